// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover options and their defaults.

use alloc::format;
use alloc::string::String;

use perch_placement::{FlipPolicy, Placement};

/// Which trigger-element events open and close the panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TriggerMode {
    /// Clicking the trigger toggles the panel.
    #[default]
    Click,
    /// Pointer enter opens, pointer leave closes.
    Hover,
    /// Focus opens, blur closes.
    Focus,
    /// Nothing is bound; the caller opens and closes the panel itself.
    Manual,
}

/// Upper bound on the rendered panel width.
///
/// Only a rendering hint; placement always uses the measured panel size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MaxWidth {
    /// A length in pixels.
    Px(f64),
    /// Any CSS length, passed through verbatim (for example `"20rem"` or `"none"`).
    Css(String),
}

impl MaxWidth {
    /// The value as a CSS length.
    #[must_use]
    pub fn css_value(&self) -> String {
        match self {
            Self::Px(px) => format!("{px}px"),
            Self::Css(css) => css.clone(),
        }
    }
}

impl Default for MaxWidth {
    fn default() -> Self {
        Self::Px(320.0)
    }
}

impl From<f64> for MaxWidth {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<&str> for MaxWidth {
    fn from(css: &str) -> Self {
        Self::Css(css.into())
    }
}

impl From<String> for MaxWidth {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

/// Options for a [`Popover`](crate::Popover).
///
/// Setting [`is_open`](Self::is_open) puts the popover in controlled mode:
/// the caller owns the open flag and the engine only reports requested changes.
/// Otherwise the engine owns it, starting from [`default_open`](Self::default_open).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopoverConfig {
    /// Preferred anchor edge and alignment.
    pub placement: Placement,
    /// Externally owned open flag. `Some` selects controlled mode.
    pub is_open: Option<bool>,
    /// Initial open flag in uncontrolled mode.
    pub default_open: bool,
    /// Which trigger events drive the panel.
    pub trigger: TriggerMode,
    /// Milliseconds between an open request and the panel opening.
    pub open_delay: u64,
    /// Milliseconds between a close request and the panel closing.
    pub close_delay: u64,
    /// Close when the pointer goes down outside both trigger and panel.
    pub close_on_click_outside: bool,
    /// Close on the Escape key.
    pub close_on_esc: bool,
    /// Compute and report an arrow offset.
    pub show_arrow: bool,
    /// Gap in pixels between anchor and panel.
    pub offset: f64,
    /// Rendering hint for the panel width.
    pub max_width: MaxWidth,
    /// Stacking hint for the panel.
    pub z_index: i32,
    /// How the panel reacts to overflowing the viewport.
    pub flip_policy: FlipPolicy,
    /// Move keyboard focus back to the trigger when Escape dismisses the panel.
    pub return_focus: bool,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            is_open: None,
            default_open: false,
            trigger: TriggerMode::Click,
            open_delay: 0,
            close_delay: 0,
            close_on_click_outside: true,
            close_on_esc: true,
            show_arrow: true,
            offset: 8.0,
            max_width: MaxWidth::default(),
            z_index: 50,
            flip_policy: FlipPolicy::BottomOnly,
            return_focus: true,
        }
    }
}

impl PopoverConfig {
    /// Whether the open flag is owned by the caller.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.is_open.is_some()
    }

    /// Sets the preferred placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Switches to controlled mode with the given open flag.
    #[must_use]
    pub fn controlled(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    /// Sets the initial open flag for uncontrolled mode.
    #[must_use]
    pub fn with_default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Sets the trigger mode.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets the open delay in milliseconds.
    #[must_use]
    pub fn with_open_delay(mut self, ms: u64) -> Self {
        self.open_delay = ms;
        self
    }

    /// Sets the close delay in milliseconds.
    #[must_use]
    pub fn with_close_delay(mut self, ms: u64) -> Self {
        self.close_delay = ms;
        self
    }

    /// Enables or disables outside-click dismissal.
    #[must_use]
    pub fn with_close_on_click_outside(mut self, enabled: bool) -> Self {
        self.close_on_click_outside = enabled;
        self
    }

    /// Enables or disables Escape dismissal.
    #[must_use]
    pub fn with_close_on_esc(mut self, enabled: bool) -> Self {
        self.close_on_esc = enabled;
        self
    }

    /// Enables or disables the arrow.
    #[must_use]
    pub fn with_show_arrow(mut self, show: bool) -> Self {
        self.show_arrow = show;
        self
    }

    /// Sets the anchor-to-panel gap. Negative values are treated as zero.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// Sets the maximum width hint.
    #[must_use]
    pub fn with_max_width(mut self, max_width: impl Into<MaxWidth>) -> Self {
        self.max_width = max_width.into();
        self
    }

    /// Sets the stacking hint.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the overflow policy.
    #[must_use]
    pub fn with_flip_policy(mut self, policy: FlipPolicy) -> Self {
        self.flip_policy = policy;
        self
    }

    /// Enables or disables returning focus to the trigger on Escape.
    #[must_use]
    pub fn with_return_focus(mut self, enabled: bool) -> Self {
        self.return_focus = enabled;
        self
    }
}
