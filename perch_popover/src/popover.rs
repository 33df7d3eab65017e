// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover engine.

use alloc::boxed::Box;
use core::fmt;

use crate::compose::NodeRef;
use crate::config::PopoverConfig;
use crate::dismiss::{Dismiss, Dismissal};
use crate::error::ContractViolation;
use crate::host::{DocumentEvent, FrameId, Host};
use crate::lifecycle::{Lifecycle, OpenChange, OpenState, Phase};
use crate::listeners::ListenerSet;
use crate::panel::{PanelProps, TriggerProps};
use crate::schedule::{Layout, Recalculation, compute_layout};
use crate::trigger::{BoundTrigger, TriggerAction, TriggerElement, TriggerEvent, bind};

/// One anchored floating panel.
///
/// The engine owns the open state, the bound trigger, and every listener and
/// frame request it makes. Transitions to closed, and [`destroy`](Self::destroy),
/// release all of them synchronously.
///
/// Every method that can change the open state returns the [`OpenChange`] it
/// reported to the `on_open_change` callback, if any.
pub struct Popover<N> {
    config: PopoverConfig,
    lifecycle: Lifecycle,
    trigger: BoundTrigger<N>,
    trigger_ref: NodeRef<N>,
    panel_ref: NodeRef<N>,
    dismissal: Dismissal,
    recalc: Recalculation,
    layout: Option<Layout>,
    on_open_change: Option<Box<dyn FnMut(bool)>>,
    // Whether recalculation and dismissal resources are held.
    active: bool,
    // Escape asked for focus to go back to the trigger once the panel closes.
    refocus: bool,
}

impl<N> fmt::Debug for Popover<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popover")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("trigger", &self.trigger)
            .field("layout", &self.layout)
            .field("active", &self.active)
            .field("refocus", &self.refocus)
            .finish_non_exhaustive()
    }
}

impl<N: Copy + PartialEq + 'static> Popover<N> {
    /// Creates a popover wrapping the single element in `children`.
    ///
    /// A popover configured to start open holds no host resources yet. Call
    /// [`mount`](Self::mount) once the host is available so its first layout
    /// and listeners are set up right away; otherwise they are acquired on the
    /// first event or [`poll`](Self::poll) routed to it.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::TriggerCount`] unless exactly one trigger
    /// element is supplied.
    pub fn new(
        config: PopoverConfig,
        children: impl IntoIterator<Item = TriggerElement<N>>,
    ) -> Result<Self, ContractViolation> {
        let trigger_ref = NodeRef::new();
        let trigger = bind(children, config.trigger, trigger_ref.clone())?;
        Ok(Self {
            lifecycle: Lifecycle::from_config(&config),
            dismissal: Dismissal::new(&config),
            recalc: Recalculation::default(),
            trigger,
            trigger_ref,
            panel_ref: NodeRef::new(),
            layout: None,
            on_open_change: None,
            active: false,
            refocus: false,
            config,
        })
    }

    /// Sets the callback invoked once per reported open/close change.
    #[must_use]
    pub fn with_on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    /// The configuration this popover was created with.
    #[must_use]
    pub const fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Acquires the resources of a popover that starts out open. Does nothing
    /// for a closed popover or one that already holds them.
    pub fn mount<H: Host<Node = N> + ?Sized>(&mut self, host: &mut H) {
        self.sync(host);
    }

    /// Attaches (`Some`) or detaches (`None`) the trigger element.
    pub fn attach_trigger(&mut self, node: Option<N>) {
        self.trigger.attach(node);
    }

    /// Attaches (`Some`) or detaches (`None`) the panel element.
    pub fn attach_panel(&mut self, node: Option<N>) {
        self.panel_ref.set(node);
    }

    /// The visible open flag.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// The underlying open state.
    #[must_use]
    pub const fn open_state(&self) -> &OpenState {
        self.lifecycle.state()
    }

    /// The last computed layout. `None` while closed or before the first
    /// successful computation.
    #[must_use]
    pub const fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Asks for the panel to open.
    pub fn request_open<H: Host<Node = N> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<OpenChange> {
        let change = self.lifecycle.request_open(now);
        self.apply(change, host)
    }

    /// Asks for the panel to close.
    pub fn request_close<H: Host<Node = N> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<OpenChange> {
        let change = self.lifecycle.request_close(now);
        self.apply(change, host)
    }

    /// Closes if open or about to open, otherwise opens.
    pub fn toggle<H: Host<Node = N> + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> Option<OpenChange> {
        let change = self.lifecycle.toggle(now);
        self.apply(change, host)
    }

    /// Mirrors a caller-owned open flag.
    ///
    /// The popover becomes controlled. Nothing is reported back through the
    /// callback. Returns whether the visible flag changed.
    pub fn set_open<H: Host<Node = N> + ?Sized>(&mut self, open: bool, host: &mut H) -> bool {
        let changed = self.lifecycle.mirror(open);
        self.sync(host);
        self.settle_focus(host);
        changed
    }

    /// Routes an event that happened on the trigger element.
    ///
    /// The caller's own handler always runs; the engine then acts according to
    /// the trigger mode, using the event timestamp as the clock.
    pub fn handle_trigger_event<H: Host<Node = N> + ?Sized>(
        &mut self,
        event: &TriggerEvent,
        host: &mut H,
    ) -> Option<OpenChange> {
        self.sync(host);
        let now = event.timestamp;
        match self.trigger.dispatch(event)? {
            TriggerAction::Toggle => self.toggle(now, host),
            TriggerAction::Open => self.request_open(now, host),
            TriggerAction::Close => self.request_close(now, host),
        }
    }

    /// Routes a document-level event from one of the registered listeners.
    ///
    /// Events for listeners this popover does not currently hold are ignored.
    ///
    /// Escape sends focus back to the trigger when `return_focus` is set, but
    /// only once the panel has actually closed: after the close delay, or in
    /// controlled mode once the caller mirrors the close.
    pub fn handle_document_event<H: Host<Node = N> + ?Sized>(
        &mut self,
        event: &DocumentEvent<N>,
        now: u64,
        host: &mut H,
    ) -> Option<OpenChange> {
        self.sync(host);
        match event {
            DocumentEvent::Resize | DocumentEvent::Scroll => {
                if self.recalc.holds(event.listener()) {
                    self.recompute(host);
                }
                None
            }
            DocumentEvent::PointerDown { .. } | DocumentEvent::KeyDown { .. } => {
                let dismiss = self.dismissal.classify(
                    event,
                    self.trigger_ref.get(),
                    self.panel_ref.get(),
                    &*host,
                )?;
                #[cfg(feature = "tracing")]
                tracing::debug!(?dismiss, "dismissing popover");
                if dismiss == Dismiss::Escape && self.config.return_focus {
                    self.refocus = true;
                }
                self.request_close(now, host)
            }
        }
    }

    /// Delivers a frame callback. Only the frame requested on opening
    /// triggers a computation.
    pub fn on_frame<H: Host<Node = N> + ?Sized>(&mut self, frame: FrameId, host: &mut H) {
        if self.recalc.take_frame(frame) {
            self.recompute(host);
        }
    }

    /// Fires a pending open or close whose deadline has passed.
    pub fn poll<H: Host<Node = N> + ?Sized>(&mut self, now: u64, host: &mut H) -> Option<OpenChange> {
        let change = self.lifecycle.poll(now);
        self.apply(change, host)
    }

    /// When [`poll`](Self::poll) next has something to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.lifecycle.next_deadline()
    }

    /// Props for the trigger element.
    #[must_use]
    pub const fn trigger_props(&self) -> TriggerProps {
        TriggerProps {
            expanded: self.is_open(),
        }
    }

    /// Props for the panel, or `None` when nothing should be rendered.
    #[must_use]
    pub fn panel_props(&self) -> Option<PanelProps> {
        self.is_open()
            .then(|| PanelProps::new(&self.config, self.layout.as_ref()))
    }

    /// Listener kinds currently registered with the host.
    #[must_use]
    pub fn registered(&self) -> ListenerSet {
        self.recalc.kinds() | self.dismissal.kinds()
    }

    /// Number of listeners currently registered with the host.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.recalc.len() + self.dismissal.len()
    }

    /// Number of pending open/close timers (zero or one).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.lifecycle.pending_timers()
    }

    /// Whether a frame callback is outstanding.
    #[must_use]
    pub fn pending_frame(&self) -> bool {
        self.recalc.has_pending_frame()
    }

    /// Tears the popover down, cancelling every timer, frame request, and
    /// listener it holds.
    pub fn destroy<H: Host<Node = N> + ?Sized>(mut self, host: &mut H) {
        self.lifecycle.cancel_timers();
        self.release(host);
        self.trigger.attach(None);
        #[cfg(feature = "tracing")]
        tracing::debug!("popover destroyed");
    }

    fn apply<H: Host<Node = N> + ?Sized>(
        &mut self,
        change: Option<OpenChange>,
        host: &mut H,
    ) -> Option<OpenChange> {
        self.sync(host);
        if let Some(change) = change {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                open = change.is_open(),
                controlled = self.lifecycle.state().is_controlled(),
                "open change"
            );
            if change == OpenChange::Opened {
                self.refocus = false;
            }
            if let Some(callback) = self.on_open_change.as_mut() {
                callback(change.is_open());
            }
        }
        self.settle_focus(host);
        change
    }

    fn settle_focus<H: Host<Node = N> + ?Sized>(&mut self, host: &mut H) {
        if !self.refocus {
            return;
        }
        match self.lifecycle.phase() {
            Phase::Closed => {
                self.refocus = false;
                if let Some(trigger) = self.trigger_ref.get() {
                    host.focus(trigger);
                }
            }
            // A pending close was cancelled by a new open request.
            Phase::Open | Phase::PendingOpen if !self.lifecycle.state().is_controlled() => {
                self.refocus = false;
            }
            _ => {}
        }
    }

    fn sync<H: Host<Node = N> + ?Sized>(&mut self, host: &mut H) {
        match (self.lifecycle.is_open(), self.active) {
            (true, false) => {
                self.recalc.start(host);
                self.dismissal.start(host);
                self.active = true;
            }
            (false, true) => self.release(host),
            _ => {}
        }
    }

    fn release<H: Host<Node = N> + ?Sized>(&mut self, host: &mut H) {
        self.recalc.stop(host);
        self.dismissal.stop(host);
        self.layout = None;
        self.active = false;
    }

    fn recompute<H: Host<Node = N> + ?Sized>(&mut self, host: &H) {
        match compute_layout(host, self.trigger_ref.get(), self.panel_ref.get(), &self.config) {
            Some(layout) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    x = layout.position.x,
                    y = layout.position.y,
                    placement = %layout.placement,
                    "layout computed"
                );
                self.layout = Some(layout);
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!("measurement miss, keeping previous layout");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerMode;
    use crate::host::Key;
    use crate::testing::FakeHost;
    use crate::trigger::TriggerEventKind;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::{Point, Rect};
    use perch_placement::{ArrowOffset, Placement, Viewport};

    const TRIGGER: u32 = 1;
    const PANEL: u32 = 2;
    const PANEL_CHILD: u32 = 3;
    const ELSEWHERE: u32 = 4;

    type Changes = Rc<RefCell<Vec<bool>>>;

    fn host() -> FakeHost {
        let mut host = FakeHost::new();
        host.set_rect(TRIGGER, Rect::new(100.0, 100.0, 150.0, 120.0));
        host.set_rect(PANEL, Rect::new(0.0, 0.0, 200.0, 80.0));
        host.set_parent(PANEL_CHILD, PANEL);
        host
    }

    fn popover(config: PopoverConfig) -> (Popover<u32>, Changes) {
        let changes = Changes::default();
        let sink = Rc::clone(&changes);
        let mut popover = Popover::new(config, [TriggerElement::new()])
            .unwrap()
            .with_on_open_change(move |open| sink.borrow_mut().push(open));
        popover.attach_trigger(Some(TRIGGER));
        popover.attach_panel(Some(PANEL));
        (popover, changes)
    }

    fn event(kind: TriggerEventKind, timestamp: u64) -> TriggerEvent {
        TriggerEvent::new(kind, timestamp)
    }

    fn click(popover: &mut Popover<u32>, host: &mut FakeHost, at: u64) -> Option<OpenChange> {
        popover.handle_trigger_event(&event(TriggerEventKind::Click, at), host)
    }

    fn deliver_frame(popover: &mut Popover<u32>, host: &mut FakeHost) {
        let frame = host.last_frame().unwrap();
        assert!(host.deliver_frame(frame));
        popover.on_frame(frame, host);
    }

    fn everything() -> ListenerSet {
        ListenerSet::all()
    }

    #[test]
    fn wrong_child_count_is_rejected() {
        let none: [TriggerElement<u32>; 0] = [];
        assert_eq!(
            Popover::new(PopoverConfig::default(), none).unwrap_err(),
            ContractViolation::TriggerCount(0)
        );
        let two = [TriggerElement::<u32>::new(), TriggerElement::new()];
        assert_eq!(
            Popover::new(PopoverConfig::default(), two).unwrap_err(),
            ContractViolation::TriggerCount(2)
        );
    }

    #[test]
    fn click_opens_and_layout_waits_for_frame() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default());

        assert_eq!(click(&mut popover, &mut host, 0), Some(OpenChange::Opened));
        assert!(popover.is_open());
        assert_eq!(*changes.borrow(), [true]);
        assert_eq!(popover.registered(), everything());
        assert_eq!(host.live_listeners(), 4);
        assert!(popover.pending_frame());
        assert_eq!(popover.layout(), None);

        deliver_frame(&mut popover, &mut host);
        let layout = popover.layout().unwrap();
        assert_eq!(layout.position, Point::new(25.0, 128.0));
        assert_eq!(layout.arrow, Some(ArrowOffset::new(-5.0, 100.0)));
        assert!(!popover.pending_frame());

        let props = popover.panel_props().unwrap();
        assert_eq!((props.top, props.left), (128.0, 25.0));
        assert!(popover.trigger_props().expanded);
    }

    #[test]
    fn closing_releases_every_listener_and_frame() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default());

        click(&mut popover, &mut host, 0);
        assert_eq!(click(&mut popover, &mut host, 10), Some(OpenChange::Closed));
        assert_eq!(*changes.borrow(), [true, false]);
        assert_eq!(popover.active_listeners(), 0);
        assert_eq!(popover.registered(), ListenerSet::empty());
        assert_eq!(host.live_listeners(), 0);
        assert_eq!(host.live_frames(), 0);
        assert_eq!(popover.layout(), None);
        assert_eq!(popover.panel_props(), None);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Hover)
            .with_close_delay(200);
        let (mut popover, _) = popover(config);

        popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 0), &mut host);
        popover.handle_trigger_event(&event(TriggerEventKind::MouseLeave, 5), &mut host);
        assert_eq!(popover.pending_timers(), 1);
        assert_eq!(host.live_listeners(), 4);

        popover.destroy(&mut host);
        assert_eq!(host.live_listeners(), 0);
        assert_eq!(host.live_frames(), 0);
    }

    #[test]
    fn reopening_cancels_pending_close() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Hover)
            .with_open_delay(50)
            .with_close_delay(50);
        let (mut popover, changes) = popover(config);

        popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 0), &mut host);
        assert_eq!(popover.phase(), Phase::PendingOpen);
        popover.poll(50, &mut host);
        assert_eq!(popover.phase(), Phase::Open);

        popover.handle_trigger_event(&event(TriggerEventKind::MouseLeave, 60), &mut host);
        assert_eq!(popover.phase(), Phase::PendingClose);
        assert_eq!(popover.next_deadline(), Some(110));

        popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 70), &mut host);
        assert_eq!(popover.pending_timers(), 0);
        assert_eq!(popover.phase(), Phase::Open);
        assert_eq!(popover.poll(500, &mut host), None);
        assert_eq!(*changes.borrow(), [true]);
    }

    #[test]
    fn closing_cancels_pending_open() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Focus)
            .with_open_delay(100);
        let (mut popover, changes) = popover(config);

        popover.handle_trigger_event(&event(TriggerEventKind::Focus, 0), &mut host);
        popover.handle_trigger_event(&event(TriggerEventKind::Blur, 20), &mut host);
        assert_eq!(popover.pending_timers(), 0);
        assert_eq!(popover.poll(100, &mut host), None);
        assert!(!popover.is_open());
        assert!(changes.borrow().is_empty());
        assert_eq!(host.live_listeners(), 0);
    }

    #[test]
    fn open_delay_defers_click() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().with_open_delay(100));

        assert_eq!(click(&mut popover, &mut host, 0), None);
        assert!(!popover.is_open());
        assert_eq!(host.live_listeners(), 0);
        assert_eq!(popover.poll(99, &mut host), None);

        assert_eq!(popover.poll(100, &mut host), Some(OpenChange::Opened));
        assert!(popover.is_open());
        assert_eq!(*changes.borrow(), [true]);
        assert_eq!(popover.poll(200, &mut host), None);
    }

    #[test]
    fn escape_closes_and_returns_focus() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default());
        click(&mut popover, &mut host, 0);

        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        assert_eq!(
            popover.handle_document_event(&esc, 10, &mut host),
            Some(OpenChange::Closed)
        );
        assert_eq!(popover.phase(), Phase::Closed);
        assert_eq!(host.focused(), [TRIGGER]);
        assert_eq!(*changes.borrow(), [true, false]);
        assert_eq!(host.live_listeners(), 0);
    }

    #[test]
    fn escape_is_ignored_when_disabled() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().with_close_on_esc(false));
        click(&mut popover, &mut host, 0);
        assert!(!popover.registered().contains(ListenerSet::KEY_DOWN));

        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        assert_eq!(popover.handle_document_event(&esc, 10, &mut host), None);
        assert!(popover.is_open());
        assert!(host.focused().is_empty());
        assert_eq!(*changes.borrow(), [true]);
    }

    #[test]
    fn escape_without_return_focus_leaves_focus_alone() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default().with_return_focus(false));
        click(&mut popover, &mut host, 0);
        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        popover.handle_document_event(&esc, 10, &mut host);
        assert!(!popover.is_open());
        assert!(host.focused().is_empty());
    }

    #[test]
    fn outside_click_closes_inside_click_does_not() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default());
        click(&mut popover, &mut host, 0);

        for target in [TRIGGER, PANEL, PANEL_CHILD] {
            let down = DocumentEvent::PointerDown { target };
            assert_eq!(popover.handle_document_event(&down, 5, &mut host), None);
            assert!(popover.is_open());
        }

        let down = DocumentEvent::PointerDown { target: ELSEWHERE };
        assert_eq!(
            popover.handle_document_event(&down, 5, &mut host),
            Some(OpenChange::Closed)
        );
        assert!(host.focused().is_empty());
    }

    #[test]
    fn resize_and_scroll_recompute() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default());
        click(&mut popover, &mut host, 0);
        deliver_frame(&mut popover, &mut host);

        // Push the anchor towards the bottom so the panel flips above it.
        host.set_rect(TRIGGER, Rect::new(100.0, 700.0, 150.0, 720.0));
        popover.handle_document_event(&DocumentEvent::Scroll, 0, &mut host);
        let layout = *popover.layout().unwrap();
        assert_eq!(layout.placement, Placement::Top);
        assert_eq!(layout.position, Point::new(25.0, 612.0));

        host.set_viewport(Viewport::new(1024.0, 768.0, 200.0));
        popover.handle_document_event(&DocumentEvent::Resize, 0, &mut host);
        let layout = popover.layout().unwrap();
        assert_eq!(layout.placement, Placement::Bottom);
        assert_eq!(layout.position, Point::new(25.0, 728.0));
    }

    #[test]
    fn measurement_miss_keeps_previous_layout() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default());
        click(&mut popover, &mut host, 0);
        deliver_frame(&mut popover, &mut host);
        let before = *popover.layout().unwrap();

        popover.attach_panel(None);
        host.set_rect(TRIGGER, Rect::new(300.0, 100.0, 350.0, 120.0));
        popover.handle_document_event(&DocumentEvent::Resize, 0, &mut host);
        assert_eq!(popover.layout(), Some(&before));
    }

    #[test]
    fn layout_events_while_closed_are_ignored() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default());
        popover.handle_document_event(&DocumentEvent::Resize, 0, &mut host);
        popover.on_frame(FrameId(1), &mut host);
        assert_eq!(popover.layout(), None);
    }

    #[test]
    fn controlled_popover_reports_and_waits_for_mirror() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().controlled(false));

        assert_eq!(click(&mut popover, &mut host, 0), Some(OpenChange::Opened));
        assert!(!popover.is_open());
        assert_eq!(host.live_listeners(), 0);
        assert_eq!(*changes.borrow(), [true]);

        assert!(popover.set_open(true, &mut host));
        assert!(popover.is_open());
        assert_eq!(host.live_listeners(), 4);
        assert_eq!(*changes.borrow(), [true]);

        assert!(popover.set_open(false, &mut host));
        assert_eq!(host.live_listeners(), 0);
        assert_eq!(host.live_frames(), 0);
    }

    #[test]
    fn manual_trigger_ignores_clicks_and_delays() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Manual)
            .with_open_delay(100);
        let (mut popover, _) = popover(config);

        assert_eq!(click(&mut popover, &mut host, 0), None);
        assert_eq!(
            popover.request_open(0, &mut host),
            Some(OpenChange::Opened)
        );
        assert_eq!(popover.pending_timers(), 0);
    }

    #[test]
    fn default_open_acquires_resources_on_mount() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().with_default_open(true));
        assert!(popover.is_open());
        assert_eq!(host.live_listeners(), 0);

        popover.mount(&mut host);
        assert_eq!(host.live_listeners(), 4);
        assert_eq!(host.live_frames(), 1);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn default_open_without_mount_acquires_on_first_event() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Hover)
            .with_default_open(true);
        let (mut popover, changes) = popover(config);

        assert_eq!(
            popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 0), &mut host),
            None
        );
        assert_eq!(popover.registered(), everything());
        assert_eq!(host.live_listeners(), 4);
        assert_eq!(host.live_frames(), 1);

        popover.handle_document_event(&DocumentEvent::Resize, 0, &mut host);
        assert_eq!(popover.layout().unwrap().position, Point::new(25.0, 128.0));
        let props = popover.panel_props().unwrap();
        assert_eq!((props.top, props.left), (128.0, 25.0));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn default_open_without_mount_acquires_on_poll() {
        let mut host = host();
        let (mut popover, _) = popover(PopoverConfig::default().with_default_open(true));
        assert_eq!(popover.poll(0, &mut host), None);
        assert_eq!(host.live_listeners(), 4);
        deliver_frame(&mut popover, &mut host);
        assert!(popover.layout().is_some());
    }

    #[test]
    fn escape_with_close_delay_returns_focus_after_closing() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().with_close_delay(100));
        click(&mut popover, &mut host, 0);

        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        assert_eq!(popover.handle_document_event(&esc, 10, &mut host), None);
        assert_eq!(popover.phase(), Phase::PendingClose);
        assert!(host.focused().is_empty());

        assert_eq!(popover.poll(110, &mut host), Some(OpenChange::Closed));
        assert_eq!(host.focused(), [TRIGGER]);
        assert_eq!(*changes.borrow(), [true, false]);
    }

    #[test]
    fn escape_then_reopen_does_not_steal_focus_later() {
        let mut host = host();
        let config = PopoverConfig::default()
            .with_trigger(TriggerMode::Hover)
            .with_close_delay(100);
        let (mut popover, _) = popover(config);
        popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 0), &mut host);

        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        popover.handle_document_event(&esc, 10, &mut host);
        popover.handle_trigger_event(&event(TriggerEventKind::MouseEnter, 20), &mut host);
        assert_eq!(popover.phase(), Phase::Open);

        popover.handle_trigger_event(&event(TriggerEventKind::MouseLeave, 30), &mut host);
        popover.poll(130, &mut host);
        assert!(!popover.is_open());
        assert!(host.focused().is_empty());
    }

    #[test]
    fn controlled_escape_returns_focus_once_mirrored() {
        let mut host = host();
        let (mut popover, changes) = popover(PopoverConfig::default().controlled(true));
        popover.mount(&mut host);

        let esc = DocumentEvent::KeyDown { key: Key::Escape };
        assert_eq!(
            popover.handle_document_event(&esc, 0, &mut host),
            Some(OpenChange::Closed)
        );
        assert!(popover.is_open());
        assert!(host.focused().is_empty());
        assert_eq!(*changes.borrow(), [false]);

        popover.set_open(false, &mut host);
        assert_eq!(host.focused(), [TRIGGER]);
        assert_eq!(host.live_listeners(), 0);
    }

    #[test]
    fn caller_handlers_still_run() {
        let mut host = host();
        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        let element = TriggerElement::new().with_handler(TriggerEventKind::Click, move |_| {
            *counter.borrow_mut() += 1;
        });
        let mut popover = Popover::new(PopoverConfig::default(), vec![element]).unwrap();
        popover.attach_trigger(Some(TRIGGER));

        click(&mut popover, &mut host, 0);
        click(&mut popover, &mut host, 1);
        assert_eq!(*clicks.borrow(), 2);
        assert!(!popover.is_open());
    }
}
