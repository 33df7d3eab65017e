// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a resolved panel inside the viewport.
//!
//! Horizontal and vertical overflow are corrected independently. Each axis is
//! shifted back inside a [`VIEWPORT_MARGIN`] gap, and the arrow is shifted the
//! opposite way so it keeps pointing at the anchor rather than following the
//! panel edge. Whether a panel is *flipped* to the opposite edge instead of
//! being shifted is decided by a [`FlipPolicy`].

use kurbo::Point;

use crate::resolve::ARROW_OVERHANG;
use crate::{ArrowOffset, Edge, PlacementRequest, Resolved};

/// Minimum gap kept between the panel and the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// Visible area the panel must stay inside.
///
/// `scroll_top` lifts the bottom limit into document space; the horizontal
/// limit is `width` alone.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Vertical document scroll offset.
    pub scroll_top: f64,
}

impl Viewport {
    /// Creates a viewport description.
    #[must_use]
    pub const fn new(width: f64, height: f64, scroll_top: f64) -> Self {
        Self {
            width,
            height,
            scroll_top,
        }
    }

    fn right_limit(&self) -> f64 {
        self.width - VIEWPORT_MARGIN
    }

    fn bottom_limit(&self) -> f64 {
        self.height + self.scroll_top - VIEWPORT_MARGIN
    }
}

/// When a panel that overflows is moved to the opposite edge of its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FlipPolicy {
    /// Never flip; always shift.
    Never,
    /// Only `bottom*` placements flip, and only when they overflow the bottom
    /// limit. The flip is unconditional (the flipped panel is not re-checked).
    /// `top*`, `left*` and `right*` placements are always shifted.
    #[default]
    BottomOnly,
    /// Any placement that overflows on its primary axis flips to the opposite
    /// edge, provided the flipped panel fits on that axis. Otherwise it is
    /// shifted.
    Symmetric,
}

/// Corrects `raw` so the panel stays inside `viewport`.
///
/// `request` supplies the anchor, panel size, offset, and requested placement
/// that produced `raw`; a flip recomputes the primary axis from them.
///
/// ```
/// use kurbo::{Rect, Size};
/// use perch_placement::{FlipPolicy, Placement, PlacementRequest, Viewport, clamp};
///
/// // Anchor hanging off the left edge of the page.
/// let req = PlacementRequest::new(
///     Rect::new(-150.0, 100.0, -100.0, 120.0),
///     Size::new(200.0, 80.0),
///     Placement::Bottom,
///     8.0,
/// );
/// let raw = req.resolve();
/// assert_eq!(raw.position.x, -225.0);
///
/// let fixed = clamp(raw, &req, Viewport::new(1024.0, 768.0, 0.0), FlipPolicy::default());
/// assert_eq!(fixed.position.x, 10.0);
/// // The panel moved 235px right, so the arrow moves 235px left within it.
/// assert_eq!(fixed.arrow.left, 100.0 - 235.0);
/// ```
#[must_use]
pub fn clamp(
    raw: Resolved,
    request: &PlacementRequest,
    viewport: Viewport,
    policy: FlipPolicy,
) -> Resolved {
    let panel = request.panel;
    let offset = request.offset.max(0.0);
    let Resolved {
        position,
        arrow,
        mut placement,
    } = raw;
    let (mut left, mut top) = (position.x, position.y);
    let (mut arrow_left, mut arrow_top) = (arrow.left, arrow.top);

    // Horizontal.
    let horizontal_flip = policy == FlipPolicy::Symmetric && !placement.edge().is_vertical();
    if left < VIEWPORT_MARGIN {
        if horizontal_flip
            && placement.edge() == Edge::Left
            && let Some(flipped) = fits(
                request.anchor.x1 + offset,
                panel.width,
                viewport.right_limit(),
            )
        {
            left = flipped;
            arrow_left = -ARROW_OVERHANG;
            placement = placement.flipped();
        } else {
            arrow_left += left - VIEWPORT_MARGIN;
            left = VIEWPORT_MARGIN;
        }
    } else if left + panel.width > viewport.right_limit() {
        if horizontal_flip
            && placement.edge() == Edge::Right
            && let Some(flipped) = fits(
                request.anchor.x0 - panel.width - offset,
                panel.width,
                viewport.right_limit(),
            )
        {
            left = flipped;
            arrow_left = panel.width;
            placement = placement.flipped();
        } else {
            let overflow = left + panel.width - viewport.right_limit();
            arrow_left += overflow;
            left -= overflow;
        }
    }

    // Vertical.
    if top < VIEWPORT_MARGIN {
        if policy == FlipPolicy::Symmetric
            && placement.edge() == Edge::Top
            && let Some(flipped) = fits(
                request.anchor.y1 + offset,
                panel.height,
                viewport.bottom_limit(),
            )
        {
            top = flipped;
            arrow_top = -ARROW_OVERHANG;
            placement = placement.flipped();
        } else {
            arrow_top += top - VIEWPORT_MARGIN;
            top = VIEWPORT_MARGIN;
        }
    } else if top + panel.height > viewport.bottom_limit() {
        let above = request.anchor.y0 - panel.height - offset;
        let flip_to = match policy {
            FlipPolicy::Never => None,
            FlipPolicy::BottomOnly => (placement.edge() == Edge::Bottom).then_some(above),
            FlipPolicy::Symmetric => (placement.edge() == Edge::Bottom)
                .then(|| fits(above, panel.height, viewport.bottom_limit()))
                .flatten(),
        };
        if let Some(flipped) = flip_to {
            top = flipped;
            arrow_top = panel.height;
            placement = placement.flipped();
        } else {
            let overflow = top + panel.height - viewport.bottom_limit();
            arrow_top += overflow;
            top -= overflow;
        }
    }

    Resolved {
        position: Point::new(left, top),
        arrow: ArrowOffset::new(arrow_top, arrow_left),
        placement,
    }
}

/// Returns `start` if a span of `size` starting there lies within the margins.
fn fits(start: f64, size: f64, limit: f64) -> Option<f64> {
    (start >= VIEWPORT_MARGIN && start + size <= limit).then_some(start)
}

/// Resolves `request` and clamps the result to `viewport`.
#[must_use]
pub fn place(request: &PlacementRequest, viewport: Viewport, policy: FlipPolicy) -> Resolved {
    clamp(request.resolve(), request, viewport, policy)
}
