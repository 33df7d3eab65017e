// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unclamped placement of a panel against its anchor.

use kurbo::{Point, Rect, Size};

use crate::{Align, Edge, Placement};

/// Largest distance of a `*-start` / `*-end` arrow from the panel's leading or
/// trailing edge.
pub const ARROW_INSET_MAX: f64 = 20.0;

/// How far the arrow sticks out past the panel edge facing a `bottom*` or
/// `right*` anchor.
pub const ARROW_OVERHANG: f64 = 5.0;

/// Position of the directional arrow relative to the panel's own box.
///
/// A component that is exactly `0.0` is treated as "unset" by renderers so that
/// a stylesheet default can apply; see [`ArrowOffset::inline_top`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowOffset {
    /// Distance from the panel's top edge.
    pub top: f64,
    /// Distance from the panel's left edge.
    pub left: f64,
}

impl ArrowOffset {
    /// Creates an arrow offset.
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// The top offset to apply inline, or `None` when unset.
    #[must_use]
    pub fn inline_top(&self) -> Option<f64> {
        (self.top != 0.0).then_some(self.top)
    }

    /// The left offset to apply inline, or `None` when unset.
    #[must_use]
    pub fn inline_left(&self) -> Option<f64> {
        (self.left != 0.0).then_some(self.left)
    }
}

/// A computed panel placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Document-space top-left corner of the panel (`x` is left, `y` is top).
    pub position: Point,
    /// Arrow position relative to the panel.
    pub arrow: ArrowOffset,
    /// The placement actually used. Differs from the requested one only when
    /// [`clamp`](crate::clamp) flipped the panel.
    pub placement: Placement,
}

/// Inputs for one placement computation.
///
/// `anchor` must already be in document space, i.e. the host has folded the
/// scroll offsets into the element's client rect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// The trigger element's geometry.
    pub anchor: Rect,
    /// The measured size of the floating panel.
    pub panel: Size,
    /// Preferred edge and alignment.
    pub placement: Placement,
    /// Gap between anchor and panel along the primary axis. Never negative.
    pub offset: f64,
}

impl PlacementRequest {
    /// Creates a request, clamping a negative `offset` to zero.
    #[must_use]
    pub fn new(anchor: Rect, panel: Size, placement: Placement, offset: f64) -> Self {
        Self {
            anchor,
            panel,
            placement,
            offset: offset.max(0.0),
        }
    }

    /// Resolves this request without viewport correction.
    #[must_use]
    pub fn resolve(&self) -> Resolved {
        resolve(self.anchor, self.panel, self.placement, self.offset)
    }
}

/// Computes the panel position and arrow offset for `placement`.
///
/// This is a pure function of its inputs. The result may lie partly or wholly
/// outside the viewport; pass it through [`clamp`](crate::clamp) to correct that.
///
/// ```
/// use kurbo::{Rect, Size};
/// use perch_placement::{Placement, resolve};
///
/// let anchor = Rect::new(100.0, 100.0, 150.0, 120.0);
/// let r = resolve(anchor, Size::new(200.0, 80.0), Placement::Bottom, 8.0);
/// assert_eq!((r.position.x, r.position.y), (25.0, 128.0));
/// assert_eq!((r.arrow.left, r.arrow.top), (100.0, -5.0));
/// ```
#[must_use]
pub fn resolve(anchor: Rect, panel: Size, placement: Placement, offset: f64) -> Resolved {
    let offset = offset.max(0.0);
    let edge = placement.edge();

    // Primary axis: which side of the anchor, and where the arrow sits on the
    // panel edge facing it.
    let (main, arrow_main) = match edge {
        Edge::Top => (anchor.y0 - panel.height - offset, panel.height),
        Edge::Bottom => (anchor.y1 + offset, -ARROW_OVERHANG),
        Edge::Left => (anchor.x0 - panel.width - offset, panel.width),
        Edge::Right => (anchor.x1 + offset, -ARROW_OVERHANG),
    };

    let (cross, arrow_cross) = if edge.is_vertical() {
        cross_axis(
            placement.align(),
            anchor.x0,
            anchor.x1,
            anchor.width(),
            panel.width,
        )
    } else {
        cross_axis(
            placement.align(),
            anchor.y0,
            anchor.y1,
            anchor.height(),
            panel.height,
        )
    };

    let (position, arrow) = if edge.is_vertical() {
        (
            Point::new(cross, main),
            ArrowOffset::new(arrow_main, arrow_cross),
        )
    } else {
        (
            Point::new(main, cross),
            ArrowOffset::new(arrow_cross, arrow_main),
        )
    };

    Resolved {
        position,
        arrow,
        placement,
    }
}

/// Returns `(panel_start, arrow_from_panel_start)` along the cross axis.
fn cross_axis(
    align: Align,
    anchor_start: f64,
    anchor_end: f64,
    anchor_size: f64,
    panel_size: f64,
) -> (f64, f64) {
    let inset = (anchor_size / 2.0).min(ARROW_INSET_MAX);
    match align {
        Align::Center => (
            anchor_start + anchor_size / 2.0 - panel_size / 2.0,
            panel_size / 2.0,
        ),
        Align::Start => (anchor_start, inset),
        Align::End => (anchor_end - panel_size, panel_size - inset),
    }
}
