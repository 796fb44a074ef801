//! # Pulse Scheduler
//!
//! A deadline-driven, single-threaded event scheduling core for
//! motion-control firmware.
//!
//! This library is the real-time heart of a motion controller: it turns a
//! stream of time-stamped output events (stepper pulses, servo updates, pin
//! toggles) into precisely timed dispatches, while cooperatively yielding to
//! a higher layer for background work (command parsing, buffer refill,
//! communications) between deadlines.
//!
//! ## Core Problem Solved
//!
//! Firmware-grade timing has constraints a general task queue does not:
//!
//! - **Deadlines are hard**: an event fired early corrupts motion; an event
//!   fired very late stalls it
//! - **No preemption**: everything runs on one execution context, so fairness
//!   between dispatch and background work must be engineered, not assumed
//! - **Bounded shutdown**: cancellation must be observed within a known
//!   window even when the loop would otherwise be asleep
//!
//! ## Key Features
//!
//! - **Single-slot scheduling**: exactly one pending event; the slot state is
//!   the only backpressure signal the driving layer needs
//! - **Deadline-clamped sleeping**: the loop sleeps until the next event or a
//!   configurable ceiling (40 ms default), whichever is sooner
//! - **Idle-slice fairness**: background work is classified `Short`/`Wide`,
//!   with periodic promotion so housekeeping gated on `Wide` slices cannot
//!   starve under a burst of cheap work
//! - **Wakeable cancellation**: a cloneable [`core::CancelToken`] ends the
//!   loop cooperatively and cuts any in-progress sleep short
//! - **Best-effort priority elevation**: jitter reduction where the platform
//!   allows it, a logged warning where it does not
//!
//! ## Usage
//!
//! The scheduler is generic over an [`core::EventExecutor`], the contract the
//! surrounding firmware implements:
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use pulse_scheduler::core::{
//!     EventExecutor, EventTime, IdleInterval, OutputEvent, Scheduler, SchedulerHandle,
//! };
//!
//! struct StepperInterface {
//!     epoch: Instant,
//!     // parser, planner, pin driver ...
//! }
//!
//! impl EventExecutor<StepPulse> for StepperInterface {
//!     fn dispatch(&mut self, event: OutputEvent<StepPulse>) {
//!         // toggle the pins described by the payload
//!     }
//!
//!     fn on_idle(&mut self, scheduler: &mut SchedulerHandle<'_, StepPulse>,
//!                interval: IdleInterval) -> bool {
//!         // parse a little g-code, refill buffers; offer the next event
//!         // through `scheduler` once the slot has room
//!         false
//!     }
//!
//!     fn sched_time(&self, time: EventTime) -> Instant {
//!         self.epoch + time.as_duration()
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new(StepperInterface::new());
//! scheduler.run_loop(); // blocks until cancelled
//! ```
//!
//! For complete examples, see `tests/event_loop_test.rs`.

/// Core scheduling abstractions: events, the execution contract, and the loop.
pub mod core;
/// Configuration models for the event loop.
pub mod config;
/// Platform capabilities consumed by the scheduler.
pub mod platform;
/// Shared utilities.
pub mod util;
