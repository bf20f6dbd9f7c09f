//! Workflow engine — cron scheduling of grouping runs.
//!
//! Routines from the config become [`ScheduledRun`]s. The [`Scheduler`]
//! checks them once a minute and emits a [`TriggeredRun`] for each one whose
//! cron expression matches; the daemon executes those against the grouping
//! job. Cron parsing is self-contained (see [`cron`]).

pub mod cron;
pub mod scheduler;

pub use cron::{CronExpr, ScheduleError};
pub use scheduler::{ScheduledRun, Scheduler, TriggeredRun};
