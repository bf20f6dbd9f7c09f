//! `pairbot run` — Group a channel once.

use std::path::Path;
use std::sync::Arc;

use pairbot_channels::{LogSink, SlackClient};
use pairbot_core::{ChannelId, ConversationSink, GroupMode};
use pairbot_grouper::{Grouper, GroupingJob};

pub async fn run(
    config_path: Option<&Path>,
    mode: GroupMode,
    channel: Option<String>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    let channel = match channel {
        Some(c) => ChannelId(c),
        None => config.channel_for(mode)?,
    };

    let slack = Arc::new(SlackClient::from_config(&config)?);
    let sink: Arc<dyn ConversationSink> = if dry_run {
        Arc::new(LogSink::new())
    } else {
        slack.clone()
    };

    let job = GroupingJob::new(Grouper::from_config(&config.grouping), slack, sink);
    let groups = job.run(&channel, mode).await?;

    if dry_run {
        println!("🔍 Dry run — {} {mode} group(s) from {channel}:", groups.len());
        for (i, group) in groups.iter().enumerate() {
            let names: Vec<&str> = group.iter().map(|m| m.as_str()).collect();
            println!("  {:>3}. {}", i + 1, names.join(", "));
        }
    } else {
        println!("✅ Started {} {mode} conversation(s) from {channel}", groups.len());
    }

    Ok(())
}
