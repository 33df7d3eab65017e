// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding trigger-element events to lifecycle requests.
//!
//! The caller hands over exactly one [`TriggerElement`] along with whatever
//! handlers and reference it already carries. [`bind`] wraps each handler so
//! the caller's code still runs first, and then yields the [`TriggerAction`]
//! the current [`TriggerMode`] maps the event to.

use alloc::boxed::Box;
use core::fmt;

use crate::compose::{ForeignRef, NodeRef, compose_handlers, merge_refs};
use crate::config::TriggerMode;
use crate::error::ContractViolation;

/// Events a trigger element can receive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEventKind {
    /// Primary click.
    Click,
    /// Pointer entered the element.
    MouseEnter,
    /// Pointer left the element.
    MouseLeave,
    /// The element gained focus.
    Focus,
    /// The element lost focus.
    Blur,
}

impl TriggerEventKind {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            Self::Click => 0,
            Self::MouseEnter => 1,
            Self::MouseLeave => 2,
            Self::Focus => 3,
            Self::Blur => 4,
        }
    }
}

/// An event on the trigger element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriggerEvent {
    /// What happened.
    pub kind: TriggerEventKind,
    /// Host time in milliseconds.
    pub timestamp: u64,
}

impl TriggerEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: TriggerEventKind, timestamp: u64) -> Self {
        Self { kind, timestamp }
    }
}

/// What the engine does in response to a bound trigger event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerAction {
    /// Close if open, otherwise open.
    Toggle,
    /// Request open.
    Open,
    /// Request close.
    Close,
}

impl TriggerMode {
    /// The action this mode binds to `kind`, if any.
    #[must_use]
    pub const fn action_for(self, kind: TriggerEventKind) -> Option<TriggerAction> {
        match (self, kind) {
            (Self::Click, TriggerEventKind::Click) => Some(TriggerAction::Toggle),
            (Self::Hover, TriggerEventKind::MouseEnter) | (Self::Focus, TriggerEventKind::Focus) => {
                Some(TriggerAction::Open)
            }
            (Self::Hover, TriggerEventKind::MouseLeave) | (Self::Focus, TriggerEventKind::Blur) => {
                Some(TriggerAction::Close)
            }
            _ => None,
        }
    }
}

/// A caller-supplied event handler.
pub type Handler = Box<dyn FnMut(&TriggerEvent)>;

/// Handlers the caller already attached to its trigger element.
#[derive(Default)]
pub struct TriggerHandlers {
    /// Click handler.
    pub on_click: Option<Handler>,
    /// Pointer-enter handler.
    pub on_mouse_enter: Option<Handler>,
    /// Pointer-leave handler.
    pub on_mouse_leave: Option<Handler>,
    /// Focus handler.
    pub on_focus: Option<Handler>,
    /// Blur handler.
    pub on_blur: Option<Handler>,
}

impl TriggerHandlers {
    fn take(&mut self, kind: TriggerEventKind) -> Option<Handler> {
        match kind {
            TriggerEventKind::Click => self.on_click.take(),
            TriggerEventKind::MouseEnter => self.on_mouse_enter.take(),
            TriggerEventKind::MouseLeave => self.on_mouse_leave.take(),
            TriggerEventKind::Focus => self.on_focus.take(),
            TriggerEventKind::Blur => self.on_blur.take(),
        }
    }
}

impl fmt::Debug for TriggerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerHandlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_mouse_enter", &self.on_mouse_enter.is_some())
            .field("on_mouse_leave", &self.on_mouse_leave.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

/// The single interactive element a popover is attached to.
#[derive(Debug)]
pub struct TriggerElement<N> {
    /// Handlers already attached by the caller.
    pub handlers: TriggerHandlers,
    /// A reference already attached by the caller.
    pub node_ref: Option<ForeignRef<N>>,
}

impl<N> TriggerElement<N> {
    /// An element with no handlers and no reference.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: TriggerHandlers::default(),
            node_ref: None,
        }
    }

    /// Attaches a caller handler for `kind`.
    #[must_use]
    pub fn with_handler(
        mut self,
        kind: TriggerEventKind,
        handler: impl FnMut(&TriggerEvent) + 'static,
    ) -> Self {
        let handler: Handler = Box::new(handler);
        let slot = match kind {
            TriggerEventKind::Click => &mut self.handlers.on_click,
            TriggerEventKind::MouseEnter => &mut self.handlers.on_mouse_enter,
            TriggerEventKind::MouseLeave => &mut self.handlers.on_mouse_leave,
            TriggerEventKind::Focus => &mut self.handlers.on_focus,
            TriggerEventKind::Blur => &mut self.handlers.on_blur,
        };
        *slot = Some(handler);
        self
    }

    /// Attaches a caller reference.
    #[must_use]
    pub fn with_ref(mut self, node_ref: ForeignRef<N>) -> Self {
        self.node_ref = Some(node_ref);
        self
    }
}

impl<N> Default for TriggerElement<N> {
    fn default() -> Self {
        Self::new()
    }
}

type BoundHandler = Box<dyn FnMut(&TriggerEvent) -> Option<TriggerAction>>;

/// A trigger element with its handlers and reference merged with the engine's.
pub struct BoundTrigger<N> {
    mode: TriggerMode,
    handlers: [BoundHandler; TriggerEventKind::COUNT],
    attach: Box<dyn FnMut(Option<N>)>,
}

impl<N> fmt::Debug for BoundTrigger<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundTrigger")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Binds the caller's trigger element for `mode`.
///
/// Fails with [`ContractViolation::TriggerCount`] unless `children` yields
/// exactly one element. `engine_ref` receives the element handle whenever the
/// host attaches it, alongside the caller's own reference.
pub fn bind<N: Copy + 'static>(
    children: impl IntoIterator<Item = TriggerElement<N>>,
    mode: TriggerMode,
    engine_ref: NodeRef<N>,
) -> Result<BoundTrigger<N>, ContractViolation> {
    let mut children = children.into_iter();
    let Some(mut element) = children.next() else {
        return Err(ContractViolation::TriggerCount(0));
    };
    let extra = children.count();
    if extra > 0 {
        return Err(ContractViolation::TriggerCount(extra + 1));
    }

    let mut wrap = |kind: TriggerEventKind| -> BoundHandler {
        let action = mode.action_for(kind);
        Box::new(compose_handlers(
            element.handlers.take(kind),
            move |_: &TriggerEvent| action,
        ))
    };
    let handlers = [
        wrap(TriggerEventKind::Click),
        wrap(TriggerEventKind::MouseEnter),
        wrap(TriggerEventKind::MouseLeave),
        wrap(TriggerEventKind::Focus),
        wrap(TriggerEventKind::Blur),
    ];

    Ok(BoundTrigger {
        mode,
        handlers,
        attach: Box::new(merge_refs(engine_ref, element.node_ref.take())),
    })
}

impl<N> BoundTrigger<N> {
    /// The mode this trigger was bound with.
    #[must_use]
    pub const fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Runs the caller's handler for `event`, then returns the engine action
    /// bound to it, if any.
    pub fn dispatch(&mut self, event: &TriggerEvent) -> Option<TriggerAction> {
        (self.handlers[event.kind.index()])(event)
    }

    /// Attaches (`Some`) or detaches (`None`) the element, updating both the
    /// engine's and the caller's references.
    pub fn attach(&mut self, node: Option<N>) {
        (self.attach)(node);
    }
}
