// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combining caller-supplied handlers and references with the engine's own.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

/// A shared, settable slot holding an element handle.
///
/// Clones share the same slot.
pub struct NodeRef<N>(Rc<Cell<Option<N>>>);

impl<N: Copy> NodeRef<N> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(None)))
    }

    /// The current element, if one is attached.
    #[must_use]
    pub fn get(&self) -> Option<N> {
        self.0.get()
    }

    /// Attaches or clears the element.
    pub fn set(&self, node: Option<N>) {
        self.0.set(node);
    }
}

impl<N: Copy> Default for NodeRef<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for NodeRef<N> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<N: Copy + fmt::Debug> fmt::Debug for NodeRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.0.get()).finish()
    }
}

/// A reference the caller already attached to the trigger element.
pub enum ForeignRef<N> {
    /// A callback invoked with the element on attach and `None` on detach.
    Callback(Box<dyn FnMut(Option<N>)>),
    /// A slot the element is written into.
    Slot(NodeRef<N>),
}

impl<N> fmt::Debug for ForeignRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("ForeignRef::Callback(..)"),
            Self::Slot(_) => f.write_str("ForeignRef::Slot(..)"),
        }
    }
}

/// Runs `existing` (when present) and then `new`, returning `new`'s result.
///
/// ```
/// use core::cell::RefCell;
/// use perch_popover::compose_handlers;
///
/// let log = RefCell::new(Vec::new());
/// let mut handler = compose_handlers(
///     Some(|e: &u32| log.borrow_mut().push(("caller", *e))),
///     |e: &u32| {
///         log.borrow_mut().push(("engine", *e));
///         *e * 2
///     },
/// );
/// assert_eq!(handler(&21), 42);
/// assert_eq!(*log.borrow(), [("caller", 21), ("engine", 21)]);
/// ```
pub fn compose_handlers<E, R, F, G>(mut existing: Option<F>, mut new: G) -> impl FnMut(&E) -> R
where
    E: ?Sized,
    F: FnMut(&E),
    G: FnMut(&E) -> R,
{
    move |event: &E| {
        if let Some(existing) = existing.as_mut() {
            existing(event);
        }
        new(event)
    }
}

/// Builds one reference callback that updates both the engine's slot and the
/// caller's own reference.
pub fn merge_refs<N: Copy>(
    own: NodeRef<N>,
    mut foreign: Option<ForeignRef<N>>,
) -> impl FnMut(Option<N>) {
    move |node: Option<N>| {
        match foreign.as_mut() {
            Some(ForeignRef::Callback(callback)) => callback(node),
            Some(ForeignRef::Slot(slot)) => slot.set(node),
            None => {}
        }
        own.set(node);
    }
}
