// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close state machine with delayed transitions.
//!
//! The controller owns no clock. Every call that can start a timer takes the
//! host time `now` in milliseconds, and [`Lifecycle::poll`] fires a timer whose
//! deadline has passed. A host typically arms one wake-up at
//! [`Lifecycle::next_deadline`] and calls `poll` from it.
//!
//! ```
//! use perch_popover::{Lifecycle, OpenChange, Phase};
//!
//! let mut life = Lifecycle::uncontrolled(false, 100, 0);
//! assert_eq!(life.request_open(1_000), None);
//! assert_eq!(life.phase(), Phase::PendingOpen);
//! assert_eq!(life.poll(1_050), None);
//! assert_eq!(life.poll(1_100), Some(OpenChange::Opened));
//! assert!(life.is_open());
//! ```

use crate::config::{PopoverConfig, TriggerMode};

/// Which transition a pending timer completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Opens the panel when it fires.
    Open,
    /// Closes the panel when it fires.
    Close,
}

/// A delayed transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PendingTimer {
    /// The transition it completes.
    pub kind: TimerKind,
    /// Host time at which it fires.
    pub deadline: u64,
}

/// Who owns the open flag.
///
/// A controlled popover mirrors a flag owned by the caller and never holds a
/// timer. An uncontrolled popover owns its flag and holds at most one pending
/// timer, so starting an open timer necessarily drops a pending close timer
/// and vice versa.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpenState {
    /// The flag is owned by the caller.
    Controlled {
        /// Last value supplied by the caller.
        open: bool,
    },
    /// The flag is owned by the engine.
    Uncontrolled {
        /// Current value.
        open: bool,
        /// A delayed transition, if one is scheduled.
        pending: Option<PendingTimer>,
    },
}

impl OpenState {
    /// The visible open flag.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        match *self {
            Self::Controlled { open } | Self::Uncontrolled { open, .. } => open,
        }
    }

    /// Whether the caller owns the flag.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// The scheduled transition, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingTimer> {
        match *self {
            Self::Controlled { .. } => None,
            Self::Uncontrolled { pending, .. } => pending,
        }
    }
}

/// Coarse lifecycle phase derived from [`OpenState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Closed with nothing scheduled.
    Closed,
    /// Closed, with an open timer running.
    PendingOpen,
    /// Open with nothing scheduled.
    Open,
    /// Open, with a close timer running.
    PendingClose,
}

/// A transition to report through the open-change callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpenChange {
    /// The panel opened (or, when controlled, should open).
    Opened,
    /// The panel closed (or, when controlled, should close).
    Closed,
}

impl OpenChange {
    /// The open flag after this change.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Opened)
    }

    const fn to(open: bool) -> Self {
        if open { Self::Opened } else { Self::Closed }
    }
}

/// The open/close state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lifecycle {
    state: OpenState,
    open_delay: u64,
    close_delay: u64,
}

impl Lifecycle {
    /// A controller whose flag is owned by the caller.
    #[must_use]
    pub const fn controlled(open: bool) -> Self {
        Self {
            state: OpenState::Controlled { open },
            open_delay: 0,
            close_delay: 0,
        }
    }

    /// A controller that owns its flag and delays transitions by the given
    /// number of milliseconds.
    #[must_use]
    pub const fn uncontrolled(open: bool, open_delay: u64, close_delay: u64) -> Self {
        Self {
            state: OpenState::Uncontrolled {
                open,
                pending: None,
            },
            open_delay,
            close_delay,
        }
    }

    /// Builds the controller described by `config`.
    ///
    /// Delays only apply to uncontrolled popovers with an automatic trigger.
    #[must_use]
    pub fn from_config(config: &PopoverConfig) -> Self {
        match config.is_open {
            Some(open) => Self::controlled(open),
            None if config.trigger == TriggerMode::Manual => {
                Self::uncontrolled(config.default_open, 0, 0)
            }
            None => Self::uncontrolled(config.default_open, config.open_delay, config.close_delay),
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &OpenState {
        &self.state
    }

    /// The visible open flag.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.state.is_open(), self.state.pending()) {
            (false, Some(_)) => Phase::PendingOpen,
            (false, None) => Phase::Closed,
            (true, Some(_)) => Phase::PendingClose,
            (true, None) => Phase::Open,
        }
    }

    /// Number of scheduled timers (zero or one).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        usize::from(self.state.pending().is_some())
    }

    /// Deadline of the scheduled timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.state.pending().map(|t| t.deadline)
    }

    /// Asks for the panel to open.
    ///
    /// Cancels a pending close. Returns the change to report, if the request
    /// produced one right away.
    pub fn request_open(&mut self, now: u64) -> Option<OpenChange> {
        self.request(true, now)
    }

    /// Asks for the panel to close.
    ///
    /// Cancels a pending open. Returns the change to report, if the request
    /// produced one right away.
    pub fn request_close(&mut self, now: u64) -> Option<OpenChange> {
        self.request(false, now)
    }

    /// Closes if open or about to open, otherwise opens.
    pub fn toggle(&mut self, now: u64) -> Option<OpenChange> {
        match self.phase() {
            Phase::Open | Phase::PendingClose | Phase::PendingOpen => self.request_close(now),
            Phase::Closed => self.request_open(now),
        }
    }

    fn request(&mut self, target: bool, now: u64) -> Option<OpenChange> {
        let delay = if target {
            self.open_delay
        } else {
            self.close_delay
        };
        let kind = if target {
            TimerKind::Open
        } else {
            TimerKind::Close
        };
        match &mut self.state {
            // Report the wish; the caller decides whether to mirror it back.
            OpenState::Controlled { open } => (*open != target).then_some(OpenChange::to(target)),
            OpenState::Uncontrolled { open, pending } => {
                if pending.is_some_and(|t| t.kind != kind) {
                    *pending = None;
                }
                if *open == target || pending.is_some() {
                    return None;
                }
                if delay > 0 {
                    *pending = Some(PendingTimer {
                        kind,
                        deadline: now.saturating_add(delay),
                    });
                    None
                } else {
                    *open = target;
                    Some(OpenChange::to(target))
                }
            }
        }
    }

    /// Fires the pending timer if its deadline is at or before `now`.
    pub fn poll(&mut self, now: u64) -> Option<OpenChange> {
        let OpenState::Uncontrolled { open, pending } = &mut self.state else {
            return None;
        };
        let timer = pending.filter(|t| t.deadline <= now)?;
        *pending = None;
        *open = timer.kind == TimerKind::Open;
        Some(OpenChange::to(*open))
    }

    /// Copies an externally owned flag, switching to controlled mode.
    ///
    /// Never produces a change to report: the caller already knows. Any
    /// pending timer is dropped. Returns whether the visible flag changed.
    pub fn mirror(&mut self, open: bool) -> bool {
        let changed = self.state.is_open() != open;
        self.state = OpenState::Controlled { open };
        changed
    }

    /// Drops any pending timer. Returns whether one was pending.
    pub fn cancel_timers(&mut self) -> bool {
        match &mut self.state {
            OpenState::Controlled { .. } => false,
            OpenState::Uncontrolled { pending, .. } => pending.take().is_some(),
        }
    }
}
