// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Placement: geometry for panels anchored to a trigger element.
//!
//! Given the anchor's rectangle, the panel's measured size, a [`Placement`], and
//! a gap, this crate computes where a floating panel (popover, tooltip, menu)
//! goes and where its directional arrow sits. It is split into two pure steps:
//!
//! - [`resolve`]: the unclamped position for one of the twelve placements. The
//!   primary axis puts the panel against the chosen [`Edge`]; the cross axis
//!   centers it or aligns its start/end with the anchor ([`Align`]).
//! - [`clamp`]: keeps the result [`VIEWPORT_MARGIN`] away from the viewport
//!   edges. Shifting the panel shifts the arrow the other way so it keeps
//!   pointing at the anchor. A [`FlipPolicy`] decides when to move the panel to
//!   the opposite edge instead.
//!
//! [`place`] runs both.
//!
//! ## Coordinates
//!
//! All rectangles are [`kurbo::Rect`] in document space: the host folds the
//! page scroll into the trigger's client rect before calling in. Positions are
//! [`kurbo::Point`] with `x` as left and `y` as top. Arrow offsets are relative
//! to the panel's own box.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use perch_placement::{FlipPolicy, Placement, PlacementRequest, Viewport, place};
//!
//! // A 50×20 button near the bottom of a 1024×768 window.
//! let request = PlacementRequest::new(
//!     Rect::new(100.0, 700.0, 150.0, 720.0),
//!     Size::new(200.0, 80.0),
//!     Placement::Bottom,
//!     8.0,
//! );
//! let viewport = Viewport::new(1024.0, 768.0, 0.0);
//!
//! // There is no room below, so the panel flips above the button.
//! let placed = place(&request, viewport, FlipPolicy::BottomOnly);
//! assert_eq!(placed.placement, Placement::Top);
//! assert_eq!(placed.position.y, 612.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Placement`], [`FlipPolicy`],
//!   [`Viewport`], and [`ArrowOffset`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod clamp;
mod placement;
mod resolve;

pub use clamp::{FlipPolicy, VIEWPORT_MARGIN, Viewport, clamp, place};
pub use placement::{Align, Edge, ParsePlacementError, Placement};
pub use resolve::{
    ARROW_INSET_MAX, ARROW_OVERHANG, ArrowOffset, PlacementRequest, Resolved, resolve,
};
