// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Popover: a headless engine for panels anchored to a trigger element.
//!
//! A [`Popover`] wraps exactly one caller-supplied trigger element and drives
//! a floating panel through its lifecycle:
//!
//! - **Open state** ([`Lifecycle`]): controlled or uncontrolled, with optional
//!   open/close delays expressed as deadlines on the host clock. Starting one
//!   kind of delay cancels the other.
//! - **Trigger binding** ([`bind`]): maps clicks, hover, or focus on the trigger
//!   to open/close requests per [`TriggerMode`], chaining the caller's own
//!   handlers ([`compose_handlers`]) and references ([`merge_refs`]).
//! - **Re-measurement**: the first layout is computed on the frame after
//!   opening, then again on every resize and capture-phase scroll. Geometry
//!   comes from [`perch_placement`].
//! - **Dismissal**: outside pointer presses and Escape close the panel.
//!
//! Everything the engine registers with the environment goes through the
//! [`Host`] trait and is recorded in an explicit [`Subscriptions`] list, so
//! closing or [destroying](Popover::destroy) a popover removes it all.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use perch_popover::{
//!     FrameId, Host, ListenerId, ListenerKind, Popover, PopoverConfig, TriggerElement,
//!     TriggerEvent, TriggerEventKind, Viewport,
//! };
//!
//! /// A page with a button (node 1) and the panel (node 2).
//! #[derive(Default)]
//! struct Page {
//!     listeners: Vec<ListenerId>,
//!     frame: Option<FrameId>,
//!     next: u64,
//! }
//!
//! impl Host for Page {
//!     type Node = u32;
//!     fn measure(&self, node: u32) -> Option<Rect> {
//!         match node {
//!             1 => Some(Rect::new(100.0, 100.0, 150.0, 120.0)),
//!             2 => Some(Rect::new(0.0, 0.0, 200.0, 80.0)),
//!             _ => None,
//!         }
//!     }
//!     fn viewport(&self) -> Viewport {
//!         Viewport::new(1024.0, 768.0, 0.0)
//!     }
//!     fn contains(&self, ancestor: u32, target: u32) -> bool {
//!         ancestor == target
//!     }
//!     fn focus(&mut self, _node: u32) {}
//!     fn add_listener(&mut self, _kind: ListenerKind) -> ListenerId {
//!         self.next += 1;
//!         self.listeners.push(ListenerId(self.next));
//!         ListenerId(self.next)
//!     }
//!     fn remove_listener(&mut self, id: ListenerId) {
//!         self.listeners.retain(|l| *l != id);
//!     }
//!     fn request_frame(&mut self) -> FrameId {
//!         self.next += 1;
//!         *self.frame.insert(FrameId(self.next))
//!     }
//!     fn cancel_frame(&mut self, _frame: FrameId) {
//!         self.frame = None;
//!     }
//! }
//!
//! let mut page = Page::default();
//! let mut popover = Popover::new(PopoverConfig::default(), [TriggerElement::new()])?;
//! popover.attach_trigger(Some(1));
//! popover.attach_panel(Some(2));
//!
//! let click = TriggerEvent::new(TriggerEventKind::Click, 0);
//! popover.handle_trigger_event(&click, &mut page);
//! assert!(popover.is_open());
//!
//! // The first layout lands on the next frame.
//! let frame = page.frame.take().unwrap();
//! popover.on_frame(frame, &mut page);
//! assert_eq!(popover.layout().unwrap().position, Point::new(25.0, 128.0));
//!
//! // Closing removes every listener the popover added.
//! popover.handle_trigger_event(&click, &mut page);
//! assert!(page.listeners.is_empty());
//! # Ok::<(), perch_popover::ContractViolation>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`PopoverConfig`] and its
//!   value types.
//! - `tracing`: emits `tracing` events for open/close transitions, listener
//!   bookkeeping, and layout computations.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod compose;
mod config;
mod dismiss;
mod error;
mod host;
mod lifecycle;
mod listeners;
mod panel;
mod popover;
mod schedule;
mod trigger;

#[cfg(test)]
mod testing;

pub use compose::{ForeignRef, NodeRef, compose_handlers, merge_refs};
pub use config::{MaxWidth, PopoverConfig, TriggerMode};
pub use error::ContractViolation;
pub use host::{DocumentEvent, FrameId, Host, Key, ListenerId, ListenerKind};
pub use lifecycle::{Lifecycle, OpenChange, OpenState, PendingTimer, Phase, TimerKind};
pub use listeners::{ListenerSet, Subscriptions};
pub use panel::{ArrowProps, PANEL_ROLE, PanelProps, TriggerProps};
pub use popover::Popover;
pub use schedule::{Layout, compute_layout};
pub use trigger::{
    BoundTrigger, Handler, TriggerAction, TriggerElement, TriggerEvent, TriggerEventKind,
    TriggerHandlers, bind,
};

pub use perch_placement::{ArrowOffset, Edge, FlipPolicy, Placement, Viewport};
