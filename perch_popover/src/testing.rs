// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Host`] for unit tests.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use kurbo::Rect;
use perch_placement::Viewport;

use crate::host::{FrameId, Host, ListenerId, ListenerKind};

/// Nodes are plain integers; geometry and ancestry are set up by the test.
#[derive(Debug)]
pub(crate) struct FakeHost {
    rects: BTreeMap<u32, Rect>,
    parents: BTreeMap<u32, u32>,
    viewport: Viewport,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    frames: BTreeSet<FrameId>,
    focused: Vec<u32>,
    next_id: u64,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            rects: BTreeMap::new(),
            parents: BTreeMap::new(),
            viewport: Viewport::new(1024.0, 768.0, 0.0),
            listeners: BTreeMap::new(),
            frames: BTreeSet::new(),
            focused: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn set_rect(&mut self, node: u32, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub(crate) fn set_parent(&mut self, child: u32, parent: u32) {
        self.parents.insert(child, parent);
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub(crate) fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn live_frames(&self) -> usize {
        self.frames.len()
    }

    /// The most recently pending frame, if any.
    pub(crate) fn last_frame(&self) -> Option<FrameId> {
        self.frames.iter().next_back().copied()
    }

    /// Marks `frame` as delivered. Returns whether it was still pending.
    pub(crate) fn deliver_frame(&mut self, frame: FrameId) -> bool {
        self.frames.remove(&frame)
    }

    pub(crate) fn focused(&self) -> &[u32] {
        &self.focused
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for FakeHost {
    type Node = u32;

    fn measure(&self, node: u32) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn contains(&self, ancestor: u32, target: u32) -> bool {
        let mut current = Some(target);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parents.get(&node).copied();
        }
        false
    }

    fn focus(&mut self, node: u32) {
        self.focused.push(node);
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.fresh_id());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        assert!(
            self.listeners.remove(&id).is_some(),
            "removed unknown listener {id:?}"
        );
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.fresh_id());
        self.frames.insert(id);
        id
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        self.frames.remove(&frame);
    }
}
