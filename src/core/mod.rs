//! Core scheduling abstractions: events, the execution contract, and the loop.

pub mod cancel;
pub mod error;
pub mod event;
pub mod executor;
pub mod scheduler;

pub use cancel::CancelToken;
pub use error::{AppResult, SchedulerError};
pub use event::{EventTime, OutputEvent};
pub use executor::{EventExecutor, IdleInterval};
pub use scheduler::{Scheduler, SchedulerHandle, DEFAULT_MAX_SLEEP, DEFAULT_WIDE_PROMOTION_PERIOD};
