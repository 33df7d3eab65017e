// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbolic placement values: an anchor edge plus an optional alignment.

use core::fmt;
use core::str::FromStr;

/// The side of the anchor a panel is placed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Edge {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Edge {
    /// Returns the opposite edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Whether the panel sits above or below the anchor.
    ///
    /// For vertical edges the primary axis is `y` and the cross axis is `x`.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the panel along the anchor's cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Align {
    /// Centered on the anchor.
    #[default]
    Center,
    /// Leading edges aligned (left for horizontal cross axes, top for vertical ones).
    Start,
    /// Trailing edges aligned.
    End,
}

/// One of the twelve placements a panel can request relative to its anchor.
///
/// The unsuffixed variants center the panel along the anchor's cross axis;
/// `*Start` / `*End` align the leading or trailing edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, left edges aligned.
    TopStart,
    /// Above, right edges aligned.
    TopEnd,
    /// Right, centered.
    Right,
    /// Right, top edges aligned.
    RightStart,
    /// Right, bottom edges aligned.
    RightEnd,
    /// Below, centered.
    #[default]
    Bottom,
    /// Below, left edges aligned.
    BottomStart,
    /// Below, right edges aligned.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, top edges aligned.
    LeftStart,
    /// Left, bottom edges aligned.
    LeftEnd,
}

impl Placement {
    /// All twelve placements, grouped by edge.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
    ];

    /// Builds a placement from its edge and alignment.
    #[must_use]
    pub const fn new(edge: Edge, align: Align) -> Self {
        match (edge, align) {
            (Edge::Top, Align::Center) => Self::Top,
            (Edge::Top, Align::Start) => Self::TopStart,
            (Edge::Top, Align::End) => Self::TopEnd,
            (Edge::Right, Align::Center) => Self::Right,
            (Edge::Right, Align::Start) => Self::RightStart,
            (Edge::Right, Align::End) => Self::RightEnd,
            (Edge::Bottom, Align::Center) => Self::Bottom,
            (Edge::Bottom, Align::Start) => Self::BottomStart,
            (Edge::Bottom, Align::End) => Self::BottomEnd,
            (Edge::Left, Align::Center) => Self::Left,
            (Edge::Left, Align::Start) => Self::LeftStart,
            (Edge::Left, Align::End) => Self::LeftEnd,
        }
    }

    /// The anchor edge this placement sits against.
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Edge::Top,
            Self::Right | Self::RightStart | Self::RightEnd => Edge::Right,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Edge::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Edge::Left,
        }
    }

    /// The cross-axis alignment of this placement.
    #[must_use]
    pub const fn align(self) -> Align {
        match self {
            Self::Top | Self::Right | Self::Bottom | Self::Left => Align::Center,
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => {
                Align::Start
            }
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd => Align::End,
        }
    }

    /// The same alignment on the opposite edge.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.edge().opposite(), self.align())
    }

    /// The kebab-case name, e.g. `"bottom-start"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown placement name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement `{name}`")]
pub struct ParsePlacementError {
    name: alloc::string::String,
}

impl ParsePlacementError {
    /// The rejected input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePlacementError { name: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn edge_and_align_round_trip_through_new() {
        for p in Placement::ALL {
            assert_eq!(Placement::new(p.edge(), p.align()), p);
        }
    }

    #[test]
    fn flipped_keeps_alignment() {
        assert_eq!(Placement::BottomStart.flipped(), Placement::TopStart);
        assert_eq!(Placement::Left.flipped(), Placement::Right);
        assert_eq!(Placement::RightEnd.flipped(), Placement::LeftEnd);
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!("bottom-end".parse::<Placement>(), Ok(Placement::BottomEnd));
        assert_eq!("left".parse::<Placement>(), Ok(Placement::Left));
        let err = "middle".parse::<Placement>().unwrap_err();
        assert_eq!(err.name(), "middle");
    }

    #[test]
    fn default_is_bottom() {
        assert_eq!(Placement::default(), Placement::Bottom);
        assert_eq!(Placement::Bottom.to_string(), "bottom");
    }
}
