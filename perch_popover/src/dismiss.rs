// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click and Escape dismissal.

use crate::config::PopoverConfig;
use crate::host::{DocumentEvent, Host, Key, ListenerKind};
use crate::listeners::{ListenerSet, Subscriptions};

/// Why an open panel should close.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Dismiss {
    /// The pointer went down outside both trigger and panel.
    OutsideClick,
    /// Escape was pressed.
    Escape,
}

/// Document listeners held while the panel is open.
#[derive(Debug, Default)]
pub(crate) struct Dismissal {
    subs: Subscriptions,
    on_outside_click: bool,
    on_escape: bool,
}

impl Dismissal {
    pub(crate) fn new(config: &PopoverConfig) -> Self {
        Self {
            subs: Subscriptions::new(),
            on_outside_click: config.close_on_click_outside,
            on_escape: config.close_on_esc,
        }
    }

    pub(crate) fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.on_outside_click {
            self.subs.subscribe(host, ListenerKind::PointerDown);
        }
        if self.on_escape {
            self.subs.subscribe(host, ListenerKind::KeyDown);
        }
    }

    pub(crate) fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.subs.release(host);
    }

    pub(crate) fn kinds(&self) -> ListenerSet {
        self.subs.kinds()
    }

    pub(crate) fn len(&self) -> usize {
        self.subs.len()
    }

    /// Classifies `event`. Events whose listener is not held are ignored, as is
    /// a pointer-down while either element is unmounted.
    pub(crate) fn classify<H: Host + ?Sized>(
        &self,
        event: &DocumentEvent<H::Node>,
        trigger: Option<H::Node>,
        panel: Option<H::Node>,
        host: &H,
    ) -> Option<Dismiss> {
        if !self.subs.holds(event.listener()) {
            return None;
        }
        match *event {
            DocumentEvent::PointerDown { target } => {
                let (trigger, panel) = (trigger?, panel?);
                let inside = host.contains(panel, target) || host.contains(trigger, target);
                (!inside).then_some(Dismiss::OutsideClick)
            }
            DocumentEvent::KeyDown { key: Key::Escape } => Some(Dismiss::Escape),
            _ => None,
        }
    }
}
