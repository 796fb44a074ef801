//! The execution contract consumed by the scheduler.

use std::time::Instant;

use crate::core::event::{EventTime, OutputEvent};
use crate::core::scheduler::SchedulerHandle;

/// Classification of an idle slice handed to the collaborator.
///
/// `Short` slices arrive back-to-back while background work is flowing and
/// should only be spent on cheap per-tick tasks. `Wide` slices arrive after
/// the loop slept, or periodically during a sustained busy burst, and are the
/// collaborator's cue to run infrequent housekeeping (heater regulation,
/// endstop polling, buffer compaction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdleInterval {
    /// Frequent, cheap slice between consecutive dispatch checks.
    Short,
    /// Periodic slice wide enough for housekeeping work.
    Wide,
}

/// Abstraction over the firmware layer the scheduler drives.
///
/// The scheduler owns the timing; the executor owns everything else: what an
/// event does when it fires, what background work fills the gaps, and how a
/// logical [`EventTime`] maps onto the monotonic clock. All three operations
/// are called synchronously from the execution context running
/// [`Scheduler::run_loop`](crate::core::Scheduler::run_loop); none of them
/// may re-enter the loop.
///
/// The bound is resolved statically, so a tight `dispatch` compiles down to a
/// direct call with no indirection on the hot path.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Instant;
/// use pulse_scheduler::core::{
///     EventExecutor, EventTime, IdleInterval, OutputEvent, SchedulerHandle,
/// };
///
/// struct MachineInterface {
///     epoch: Instant,
///     planner: MotionPlanner,
/// }
///
/// impl EventExecutor<PinToggle> for MachineInterface {
///     fn dispatch(&mut self, event: OutputEvent<PinToggle>) {
///         event.into_payload().apply();
///     }
///
///     fn on_idle(&mut self, scheduler: &mut SchedulerHandle<'_, PinToggle>,
///                interval: IdleInterval) -> bool {
///         if scheduler.has_room_for_event() {
///             if let Some(evt) = self.planner.next_event() {
///                 scheduler.offer_event(evt);
///             }
///         }
///         self.planner.has_buffered_work()
///     }
///
///     fn sched_time(&self, time: EventTime) -> Instant {
///         self.epoch + time.as_duration()
///     }
/// }
/// ```
pub trait EventExecutor<P> {
    /// Execute an event whose deadline has passed.
    ///
    /// Called only when `sched_time(event.time())` is at or before the
    /// monotonic clock's now. Expected to be fast and non-blocking; a slow
    /// dispatch widens the jitter window for every later event.
    fn dispatch(&mut self, event: OutputEvent<P>);

    /// Run one quantum of background work.
    ///
    /// `scheduler` is the only sanctioned way to reach back into the loop:
    /// offer the next pending event, check slot room, or request exit. The
    /// return value reports whether more background work is ready to run
    /// immediately (`true`) or the collaborator is done for now (`false`),
    /// which lets the loop sleep.
    fn on_idle(&mut self, scheduler: &mut SchedulerHandle<'_, P>, interval: IdleInterval) -> bool;

    /// Translate a logical event time into an absolute wake deadline.
    ///
    /// Pure with respect to scheduling: the loop may call it several times
    /// per iteration for the same value and expects the same answer each
    /// time.
    fn sched_time(&self, time: EventTime) -> Instant;
}
