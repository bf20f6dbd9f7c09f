//! `pairbot daemon` — Run configured routines on their schedules.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use pairbot_channels::SlackClient;
use pairbot_grouper::{Grouper, GroupingJob};
use pairbot_workflow::{Scheduler, TriggeredRun};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    println!("🤝 PairBot Daemon — Starting scheduler");
    println!("   Routines: {}", config.routines.len());

    let slack = Arc::new(SlackClient::from_config(&config)?);
    let job = GroupingJob::new(Grouper::from_config(&config.grouping), slack.clone(), slack);

    let scheduler = Scheduler::new();
    let errors = scheduler.load_routines(&config).await;
    for err in &errors {
        warn!("Routine load error: {err}");
    }
    let loaded = config.routines.len() - errors.len();
    info!(loaded, total = config.routines.len(), "Routines loaded from config");

    if loaded == 0 {
        println!("   Nothing to schedule — add [[routines]] to your config.");
        return Ok(());
    }

    let now = Utc::now();
    for run in scheduler.list_runs().await {
        let next = run
            .schedule
            .next_after(now)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".into());
        let state = if run.enabled { "" } else { " (paused)" };
        println!("   • {:<20} {:<16} {} → next: {next}{state}", run.name, run.schedule.as_str(), run.channel);
    }

    let (task_rx, scheduler_handle) = scheduler.start();
    info!("Scheduler started");

    tokio::select! {
        _ = process(&job, task_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    scheduler_handle.abort();
    Ok(())
}

/// Execute triggered runs one at a time. A failed run is logged and the
/// daemon keeps going.
async fn process(job: &GroupingJob, mut task_rx: mpsc::Receiver<TriggeredRun>) {
    while let Some(triggered) = task_rx.recv().await {
        info!(
            name = %triggered.name,
            channel = %triggered.channel,
            mode = %triggered.mode,
            "Processing triggered run"
        );
        match job.run(&triggered.channel, triggered.mode).await {
            Ok(groups) => info!(name = %triggered.name, conversations = groups.len(), "Run complete"),
            Err(e) => error!(name = %triggered.name, error = %e, "Run failed"),
        }
    }
}
