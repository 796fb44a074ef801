//! The deadline-driven event loop.
//!
//! The scheduler interleaves three activities on one execution context:
//! dispatching the pending event the moment its deadline passes, handing idle
//! slices to the collaborator, and sleeping efficiently when neither has
//! anything to do. It holds exactly one pending event; anything resembling a
//! queue belongs to the layer above.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::SchedulerConfig;
use crate::core::cancel::CancelToken;
use crate::core::error::SchedulerError;
use crate::core::event::OutputEvent;
use crate::core::executor::{EventExecutor, IdleInterval};
use crate::platform::priority;
use crate::util::clock::EventClock;

/// Default ceiling on any single blocking sleep.
///
/// Idle handlers must run every so often even when no event is due, and
/// cancellation latency is bounded by this value plus one idle slice. Lower
/// it for snappier background servicing at the cost of more wakeups.
pub const DEFAULT_MAX_SLEEP: Duration = Duration::from_millis(40);

/// Default number of consecutive busy idle slices after which one slice is
/// promoted to [`IdleInterval::Wide`].
///
/// A fairness bound, not a correctness requirement: without it, a sustained
/// burst of cheap `Short` work would starve handlers that only act on `Wide`
/// slices.
pub const DEFAULT_WIDE_PROMOTION_PERIOD: u32 = 2048;

fn install<P>(slot: &mut Option<OutputEvent<P>>, event: OutputEvent<P>) {
    if slot.replace(event).is_some() {
        // Overwrite is the documented contract; callers are expected to gate
        // offers on has_room_for_event().
        warn!("pending event overwritten before dispatch");
    }
}

/// The single-slot, deadline-driven scheduler.
///
/// Owns one optional pending [`OutputEvent`], the sleep ceiling, and the exit
/// flag. Construction is cheap; the instance does nothing until
/// [`run_loop`](Self::run_loop) is called, which blocks its execution context
/// until cancellation is observed.
///
/// All event offering is expected to happen from within
/// [`EventExecutor::on_idle`] via the [`SchedulerHandle`]; the slot has no
/// internal locking, and the [`CancelToken`] is the only surface safe to
/// touch from another context.
pub struct Scheduler<P, E>
where
    E: EventExecutor<P>,
{
    executor: E,
    next_event: Option<OutputEvent<P>>,
    max_sleep: Duration,
    wide_promotion_period: u32,
    elevate_priority: bool,
    cancel: CancelToken,
}

impl<P, E> Scheduler<P, E>
where
    E: EventExecutor<P>,
{
    /// Scheduler with default settings: 40 ms sleep ceiling, promotion every
    /// 2048 busy slices, no priority elevation.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            next_event: None,
            max_sleep: DEFAULT_MAX_SLEEP,
            wide_promotion_period: DEFAULT_WIDE_PROMOTION_PERIOD,
            elevate_priority: false,
            cancel: CancelToken::new(),
        }
    }

    /// Scheduler configured from a validated [`SchedulerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn from_config(executor: E, config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        let mut scheduler = Self::new(executor);
        scheduler.max_sleep = config.max_sleep();
        scheduler.wide_promotion_period = config.wide_promotion_period;
        scheduler.elevate_priority = config.elevate_priority;
        Ok(scheduler)
    }

    /// Configure the sleep ceiling.
    ///
    /// Smaller values reduce worst-case latency for background work and for
    /// cancellation, at the cost of more frequent wakeups.
    pub fn set_max_sleep(&mut self, duration: Duration) {
        self.max_sleep = duration;
    }

    /// Current sleep ceiling.
    #[must_use]
    pub fn max_sleep(&self) -> Duration {
        self.max_sleep
    }

    /// Install `event` as the pending event, overwriting any previous
    /// occupant.
    ///
    /// Callers should gate on [`has_room_for_event`](Self::has_room_for_event)
    /// first; displacing a live event is legal but logged as a warning, and
    /// the displaced event is simply dropped.
    pub fn offer_event(&mut self, event: OutputEvent<P>) {
        install(&mut self.next_event, event);
    }

    /// Whether the pending slot is empty.
    ///
    /// This one-deep buffer state is the only backpressure signal offered to
    /// the driving layer.
    #[must_use]
    pub fn has_room_for_event(&self) -> bool {
        self.next_event.is_none()
    }

    /// Request cooperative cancellation of a running loop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Clone of the loop's cancellation token, for shutting the loop down
    /// from another execution context. Cancelling the token also wakes any
    /// in-progress bounded sleep early.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Best-effort request to elevate the calling context's scheduling
    /// priority, shrinking dispatch jitter. Failure is logged and ignored.
    pub fn raise_scheduling_priority(&self) {
        match priority::raise_current_thread_priority() {
            Ok(()) => debug!("scheduling priority elevated"),
            Err(err) => {
                warn!(%err, "continuing at default scheduling priority");
            }
        }
    }

    /// Borrow the collaborating executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Consume the scheduler, yielding the executor.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Run the event loop until cancellation is observed.
    ///
    /// Each iteration dispatches the pending event if its deadline has
    /// passed, hands one idle slice to the executor, and then either keeps
    /// spinning (more background work ready) or sleeps until the earlier of
    /// the next deadline and the sleep ceiling. The exit flag is re-armed on
    /// return, so the same instance can be restarted.
    pub fn run_loop(&mut self) {
        if self.elevate_priority {
            self.raise_scheduling_priority();
        }
        debug!(max_sleep = ?self.max_sleep, "event loop starting");

        let mut interval = IdleInterval::Wide;
        let mut busy_streak: u32 = 0;

        while !self.cancel.is_cancelled() {
            let Self { executor, next_event, cancel, .. } = self;

            if let Some(event) =
                next_event.take_if(|evt| executor.sched_time(evt.time()) <= EventClock::now())
            {
                trace!("dispatching due event");
                executor.dispatch(event);
            }

            let mut handle = SchedulerHandle { slot: next_event, cancel };
            if executor.on_idle(&mut handle, interval) {
                busy_streak += 1;
                interval = if busy_streak % self.wide_promotion_period == 0 {
                    IdleInterval::Wide
                } else {
                    IdleInterval::Short
                };
            } else {
                busy_streak = 0;
                // Re-check before committing to a potentially long sleep; the
                // idle slice may have requested exit.
                if self.cancel.is_cancelled() {
                    break;
                }
                self.sleep_until_event();
                // The sleep itself constitutes a wide gap.
                interval = IdleInterval::Wide;
            }
        }

        debug!("event loop exiting");
        self.cancel.clear();
    }

    /// Sleep until the pending event's deadline or the sleep ceiling,
    /// whichever is sooner. With an empty slot this is a plain ceiling-length
    /// sleep. Cancellation wakes it early.
    fn sleep_until_event(&self) {
        let mut deadline = EventClock::now() + self.max_sleep;
        if let Some(event) = &self.next_event {
            let due = self.executor.sched_time(event.time());
            if due < deadline {
                deadline = due;
            }
        }
        trace!("sleeping until next deadline");
        self.cancel.sleep_until(deadline);
    }
}

/// The scheduler surface exposed to [`EventExecutor::on_idle`].
///
/// Borrowing the slot and the exit flag, and nothing else, lets the
/// collaborator feed the loop it is running inside without aliasing the loop
/// state, and makes it impossible for an idle slice to re-enter
/// [`Scheduler::run_loop`].
pub struct SchedulerHandle<'a, P> {
    slot: &'a mut Option<OutputEvent<P>>,
    cancel: &'a CancelToken,
}

impl<P> SchedulerHandle<'_, P> {
    /// Install `event` as the pending event; see
    /// [`Scheduler::offer_event`] for the overwrite contract.
    pub fn offer_event(&mut self, event: OutputEvent<P>) {
        install(self.slot, event);
    }

    /// Whether the pending slot is empty.
    #[must_use]
    pub fn has_room_for_event(&self) -> bool {
        self.slot.is_none()
    }

    /// Request that the loop exit once this idle slice returns.
    pub fn request_exit(&self) {
        self.cancel.cancel();
    }
}
