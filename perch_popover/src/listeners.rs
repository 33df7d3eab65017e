// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit ownership of registered document listeners.

use smallvec::SmallVec;

use crate::host::{Host, ListenerId, ListenerKind};

bitflags::bitflags! {
    /// A set of [`ListenerKind`]s.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerSet: u8 {
        /// Window resize.
        const RESIZE = 1 << 0;
        /// Capture-phase scroll.
        const SCROLL_CAPTURE = 1 << 1;
        /// Document pointer down.
        const POINTER_DOWN = 1 << 2;
        /// Document key down.
        const KEY_DOWN = 1 << 3;
    }
}

/// The listeners one component registered with a [`Host`].
///
/// Every registration goes through [`subscribe`](Self::subscribe) and is
/// recorded here, so [`release`](Self::release) can remove all of them by
/// walking the list. At most one listener of each kind is held.
#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    entries: SmallVec<[(ListenerKind, ListenerId); 4]>,
}

impl Subscriptions {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `kind` with the host unless it is already held.
    pub fn subscribe<H: Host + ?Sized>(&mut self, host: &mut H, kind: ListenerKind) {
        if self.holds(kind) {
            return;
        }
        let id = host.add_listener(kind);
        #[cfg(feature = "tracing")]
        tracing::debug!(?kind, id = id.0, "listener added");
        self.entries.push((kind, id));
    }

    /// Removes every held listener from the host. Returns how many were removed.
    pub fn release<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        let count = self.entries.len();
        for (_kind, id) in self.entries.drain(..) {
            #[cfg(feature = "tracing")]
            tracing::debug!(kind = ?_kind, id = id.0, "listener removed");
            host.remove_listener(id);
        }
        count
    }

    /// Whether a listener of `kind` is held.
    #[must_use]
    pub fn holds(&self, kind: ListenerKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    /// The kinds currently held.
    #[must_use]
    pub fn kinds(&self) -> ListenerSet {
        self.entries
            .iter()
            .fold(ListenerSet::empty(), |set, (kind, _)| set | kind.as_set())
    }

    /// Number of held listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
