//! Scheduler for grouping runs.

use chrono::{DateTime, Utc};
use pairbot_config::AppConfig;
use pairbot_core::{ChannelId, GroupMode};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};

use crate::cron::{CronExpr, ScheduleError};

/// A grouping run registered with the scheduler.
#[derive(Debug, Clone)]
pub struct ScheduledRun {
    pub name: String,
    pub schedule: CronExpr,
    pub mode: GroupMode,
    pub channel: ChannelId,
    pub enabled: bool,
    pub last_run: Option<DateTime<Utc>>,
}

impl ScheduledRun {
    /// Build a run from a config routine, resolving its channel.
    pub fn from_routine(config: &AppConfig, routine: &pairbot_config::RoutineConfig) -> Result<Self, String> {
        let schedule = CronExpr::parse(&routine.schedule).map_err(|e| e.to_string())?;
        let channel = config.routine_channel(routine).map_err(|e| e.to_string())?;
        Ok(Self {
            name: routine.name.clone(),
            schedule,
            mode: routine.mode,
            channel,
            enabled: routine.enabled,
            last_run: None,
        })
    }

    fn fired_this_minute(&self, now: &DateTime<Utc>) -> bool {
        self.last_run
            .is_some_and(|last| last.timestamp().div_euclid(60) == now.timestamp().div_euclid(60))
    }
}

/// A run whose schedule matched; the receiver executes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggeredRun {
    pub name: String,
    pub mode: GroupMode,
    pub channel: ChannelId,
    pub fired_at: DateTime<Utc>,
}

/// Holds scheduled runs and emits them when their cron expression matches.
#[derive(Clone, Default)]
pub struct Scheduler {
    runs: Arc<RwLock<Vec<ScheduledRun>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run. Names must be unique.
    pub async fn add_run(&self, run: ScheduledRun) -> Result<(), ScheduleError> {
        let mut runs = self.runs.write().await;
        if runs.iter().any(|r| r.name == run.name) {
            return Err(ScheduleError::DuplicateRun(run.name));
        }
        info!(name = %run.name, schedule = %run.schedule, mode = %run.mode, channel = %run.channel, "Scheduling grouping run");
        runs.push(run);
        Ok(())
    }

    pub async fn list_runs(&self) -> Vec<ScheduledRun> {
        self.runs.read().await.clone()
    }

    /// Register every routine in `config`; returns one message per routine
    /// that could not be scheduled.
    pub async fn load_routines(&self, config: &AppConfig) -> Vec<String> {
        let mut errors = Vec::new();
        for routine in &config.routines {
            let added = match ScheduledRun::from_routine(config, routine) {
                Ok(run) => self.add_run(run).await.map_err(|e| e.to_string()),
                Err(e) => Err(e),
            };
            if let Err(e) = added {
                errors.push(format!("Routine '{}': {e}", routine.name));
            }
        }
        errors
    }

    /// Runs due at `now`, marking each as fired. A run fires at most once per minute.
    pub async fn due(&self, now: DateTime<Utc>) -> Vec<TriggeredRun> {
        let mut runs = self.runs.write().await;
        runs.iter_mut()
            .filter(|run| run.enabled && run.schedule.matches(&now) && !run.fired_this_minute(&now))
            .map(|run| {
                run.last_run = Some(now);
                info!(name = %run.name, mode = %run.mode, "Grouping run triggered");
                TriggeredRun {
                    name: run.name.clone(),
                    mode: run.mode,
                    channel: run.channel.clone(),
                    fired_at: now,
                }
            })
            .collect()
    }

    /// Start the background loop.
    ///
    /// Ticks every minute and sends due runs on the returned receiver. The
    /// loop stops once the receiver is dropped.
    pub fn start(&self) -> (mpsc::Receiver<TriggeredRun>, tokio::task::JoinHandle<()>) {
        let scheduler = self.clone();
        let (tx, rx) = mpsc::channel::<TriggeredRun>(16);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));

            loop {
                interval.tick().await;
                for triggered in scheduler.due(Utc::now()).await {
                    if tx.send(triggered).await.is_err() {
                        debug!("Triggered run receiver dropped, stopping scheduler loop");
                        return;
                    }
                }
            }
        });

        (rx, handle)
    }
}
