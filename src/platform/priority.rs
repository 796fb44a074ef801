//! Best-effort scheduling-priority elevation.
//!
//! Dispatch jitter shrinks considerably when the loop's thread outranks the
//! rest of the process, but no platform guarantees the request will be
//! honored; unprivileged processes on most systems cannot take real-time
//! priorities. Callers treat failure as a degraded mode, never an abort.

use thread_priority::{set_current_thread_priority, ThreadPriority};

use crate::core::error::SchedulerError;

/// Ask the platform to raise the calling thread to the highest priority it
/// will grant.
///
/// # Errors
///
/// Returns [`SchedulerError::PriorityElevation`] when the platform refuses;
/// the thread keeps its previous priority.
pub fn raise_current_thread_priority() -> Result<(), SchedulerError> {
    set_current_thread_priority(ThreadPriority::Max)
        .map_err(|err| SchedulerError::PriorityElevation(format!("{err:?}")))
}
