// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values handed to the renderer.

use alloc::string::String;

use perch_placement::{Edge, Placement};

use crate::config::PopoverConfig;
use crate::schedule::Layout;

/// Structural role exposed on the panel for assistive technology.
pub const PANEL_ROLE: &str = "tooltip";

/// Inline attributes for the open panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelProps {
    /// Always [`PANEL_ROLE`].
    pub role: &'static str,
    /// Document-space top edge.
    pub top: f64,
    /// Document-space left edge.
    pub left: f64,
    /// CSS `max-width` value.
    pub max_width: String,
    /// Stacking hint.
    pub z_index: i32,
    /// The arrow, when shown.
    pub arrow: Option<ArrowProps>,
}

impl PanelProps {
    /// Builds the props from the configuration and the last computed layout.
    ///
    /// Until the first layout lands the panel sits at the document origin and
    /// the arrow has no inline offsets.
    #[must_use]
    pub fn new(config: &PopoverConfig, layout: Option<&Layout>) -> Self {
        let (top, left) = layout.map_or((0.0, 0.0), |l| (l.position.y, l.position.x));
        let arrow = config.show_arrow.then(|| match layout {
            Some(layout) => ArrowProps {
                side: ArrowProps::side_for(layout.placement),
                top: layout.arrow.and_then(|a| a.inline_top()),
                left: layout.arrow.and_then(|a| a.inline_left()),
            },
            None => ArrowProps {
                side: ArrowProps::side_for(config.placement),
                top: None,
                left: None,
            },
        });
        Self {
            role: PANEL_ROLE,
            top,
            left,
            max_width: config.max_width.css_value(),
            z_index: config.z_index,
            arrow,
        }
    }
}

/// Inline attributes for the arrow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowProps {
    /// The side of the panel the arrow sits on, facing the anchor.
    pub side: Edge,
    /// Top offset, `None` when unset.
    pub top: Option<f64>,
    /// Left offset, `None` when unset.
    pub left: Option<f64>,
}

impl ArrowProps {
    /// The panel side facing the anchor for `placement`.
    #[must_use]
    pub const fn side_for(placement: Placement) -> Edge {
        placement.edge().opposite()
    }
}

/// Attributes for the trigger element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerProps {
    /// Whether the panel is open.
    pub expanded: bool,
}
