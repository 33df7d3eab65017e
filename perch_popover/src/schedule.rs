// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-measuring an open panel.
//!
//! The first computation after opening is deferred to the next frame, when the
//! panel is mounted and measurable. After that, every resize and every
//! capture-phase scroll recomputes synchronously.

use kurbo::Point;
use perch_placement::{ArrowOffset, Placement, PlacementRequest, place};

use crate::config::PopoverConfig;
use crate::host::{FrameId, Host, ListenerKind};
use crate::listeners::{ListenerSet, Subscriptions};

/// Final coordinates for the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Document-space top-left corner of the panel (`x` is left, `y` is top).
    pub position: Point,
    /// Arrow offset relative to the panel, when the arrow is shown.
    pub arrow: Option<ArrowOffset>,
    /// The placement in effect after any flip.
    pub placement: Placement,
}

/// Measures the trigger and panel and places the panel.
///
/// Returns `None` when either element is unmounted or unmeasurable.
pub fn compute_layout<H: Host + ?Sized>(
    host: &H,
    trigger: Option<H::Node>,
    panel: Option<H::Node>,
    config: &PopoverConfig,
) -> Option<Layout> {
    let anchor = host.measure(trigger?)?;
    let panel = host.measure(panel?)?;
    let request = PlacementRequest::new(anchor, panel.size(), config.placement, config.offset);
    let placed = place(&request, host.viewport(), config.flip_policy);
    Some(Layout {
        position: placed.position,
        arrow: config.show_arrow.then_some(placed.arrow),
        placement: placed.placement,
    })
}

/// Subscriptions and the pending frame held while the panel is open.
#[derive(Debug, Default)]
pub(crate) struct Recalculation {
    subs: Subscriptions,
    frame: Option<FrameId>,
}

impl Recalculation {
    pub(crate) fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.frame.is_none() {
            self.frame = Some(host.request_frame());
        }
        self.subs.subscribe(host, ListenerKind::Resize);
        self.subs.subscribe(host, ListenerKind::ScrollCapture);
    }

    pub(crate) fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        self.subs.release(host);
    }

    /// Consumes the pending frame if `frame` is it.
    pub(crate) fn take_frame(&mut self, frame: FrameId) -> bool {
        if self.frame == Some(frame) {
            self.frame = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub(crate) fn holds(&self, kind: ListenerKind) -> bool {
        self.subs.holds(kind)
    }

    pub(crate) fn kinds(&self) -> ListenerSet {
        self.subs.kinds()
    }

    pub(crate) fn len(&self) -> usize {
        self.subs.len()
    }
}
