// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a popover runs in.
//!
//! A [`Host`] is whatever owns the element tree and the event loop: a DOM
//! binding, a retained-mode widget toolkit, or a test double. The engine asks
//! it for geometry, for document-level listeners, and for frame callbacks, and
//! the host feeds the resulting events back through
//! [`Popover::handle_document_event`](crate::Popover::handle_document_event)
//! and [`Popover::on_frame`](crate::Popover::on_frame).

use kurbo::Rect;
use perch_placement::Viewport;

use crate::ListenerSet;

/// A document-level event source the engine can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Window resize.
    Resize,
    /// Scroll, observed in the capture phase so scrolling of any ancestor
    /// container is seen.
    ScrollCapture,
    /// Pointer press anywhere in the document.
    PointerDown,
    /// Key press anywhere in the document.
    KeyDown,
}

impl ListenerKind {
    /// Whether the listener must be registered for the capture phase.
    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(self, Self::ScrollCapture)
    }

    /// The single-kind [`ListenerSet`].
    #[must_use]
    pub const fn as_set(self) -> ListenerSet {
        match self {
            Self::Resize => ListenerSet::RESIZE,
            Self::ScrollCapture => ListenerSet::SCROLL_CAPTURE,
            Self::PointerDown => ListenerSet::POINTER_DOWN,
            Self::KeyDown => ListenerSet::KEY_DOWN,
        }
    }
}

/// Host-assigned handle of a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host-assigned handle of a requested frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Keys the engine distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// Any other key.
    Other,
}

/// A document-level event delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent<N> {
    /// The window was resized.
    Resize,
    /// The document or an ancestor container scrolled.
    Scroll,
    /// A pointer went down on `target`.
    PointerDown {
        /// The node under the pointer.
        target: N,
    },
    /// A key went down.
    KeyDown {
        /// Which key.
        key: Key,
    },
}

impl<N> DocumentEvent<N> {
    /// The listener kind that delivers this event.
    #[must_use]
    pub const fn listener(&self) -> ListenerKind {
        match self {
            Self::Resize => ListenerKind::Resize,
            Self::Scroll => ListenerKind::ScrollCapture,
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::KeyDown { .. } => ListenerKind::KeyDown,
        }
    }
}

/// Services a popover needs from its environment.
pub trait Host {
    /// Handle of an element in the host's tree.
    type Node: Copy + PartialEq;

    /// The element's bounds in document space (scroll offsets folded in).
    ///
    /// Returns `None` when the element is not mounted or cannot be measured yet;
    /// the engine treats that as a skipped computation, not an error.
    fn measure(&self, node: Self::Node) -> Option<Rect>;

    /// Current viewport size and vertical scroll offset.
    fn viewport(&self) -> Viewport;

    /// Whether `target` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Node, target: Self::Node) -> bool;

    /// Moves keyboard focus to `node`.
    fn focus(&mut self, node: Self::Node);

    /// Registers a document-level listener. Events it receives must be
    /// forwarded to the popover that registered it.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Removes a listener previously returned by [`Host::add_listener`].
    fn remove_listener(&mut self, id: ListenerId);

    /// Requests a callback at the next paint opportunity.
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a pending frame callback.
    fn cancel_frame(&mut self, frame: FrameId);
}
