//! Scheduled event value types.

use std::ops::{Add, AddAssign};
use std::time::Duration;

/// Logical timestamp of a scheduled event.
///
/// An `EventTime` is a duration measured from the driving layer's planning
/// epoch, not an absolute instant. The scheduler never interprets it
/// directly; translation to an absolute wake deadline is the collaborator's
/// job via [`EventExecutor::sched_time`](crate::core::EventExecutor::sched_time),
/// which is where calibration or latency compensation is applied.
///
/// Only ordering and `Duration` arithmetic are exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventTime(Duration);

impl EventTime {
    /// The planning epoch itself.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Logical time `since_epoch` after the planning epoch.
    #[must_use]
    pub const fn new(since_epoch: Duration) -> Self {
        Self(since_epoch)
    }

    /// Logical time expressed in microseconds, the native resolution of most
    /// step-pulse planners.
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(Duration::from_micros(micros))
    }

    /// Offset from the planning epoch.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Gap between two logical times, zero if `earlier` is actually later.
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    /// Logical time moved `amount` earlier, clamped at the epoch.
    #[must_use]
    pub fn saturating_sub(self, amount: Duration) -> Self {
        Self(self.0.saturating_sub(amount))
    }
}

impl Add<Duration> for EventTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl AddAssign<Duration> for EventTime {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

/// A time-stamped, opaque action awaiting dispatch.
///
/// Built by the driving layer, read-only once constructed. The payload is
/// whatever the collaborating
/// [`EventExecutor`](crate::core::EventExecutor) knows how to dispatch: a
/// pin state, a pulse train descriptor, a DAC word. The scheduler only ever
/// looks at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEvent<P> {
    time: EventTime,
    payload: P,
}

impl<P> OutputEvent<P> {
    /// Build an event firing at logical time `time`.
    pub fn new(time: EventTime, payload: P) -> Self {
        Self { time, payload }
    }

    /// Logical time at which this event becomes eligible for dispatch.
    pub fn time(&self) -> EventTime {
        self.time
    }

    /// Borrow the opaque payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the event, yielding the payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}
