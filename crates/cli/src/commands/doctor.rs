//! `pairbot doctor` — Diagnose configuration.

use std::path::Path;

use pairbot_config::AppConfig;
use pairbot_core::GroupMode;
use pairbot_workflow::CronExpr;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 PairBot Doctor — Configuration Diagnostics");
    println!("============================================\n");

    let path = super::config_path(config_path);
    if path.exists() {
        println!("  ✅ Config file found: {}", path.display());
    } else {
        println!("  ⚠️  No config file at {} — using defaults (run `pairbot onboard`)", path.display());
    }

    let config = match AppConfig::load_with_env(&path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    let issues = diagnose(&config);
    for issue in &issues {
        println!("  ⚠️  {issue}");
    }

    println!();
    if issues.is_empty() {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {} issue(s) found. See above for details.", issues.len());
    }

    Ok(())
}

/// Problems that would stop a run from succeeding.
fn diagnose(config: &AppConfig) -> Vec<String> {
    let mut issues = Vec::new();

    if !config.has_bot_token() {
        issues.push("No Slack bot token — set SLACK_BOT_TOKEN or slack.bot_token".to_string());
    }

    for mode in [GroupMode::Pairing, GroupMode::Group] {
        let used = config.routines.iter().any(|r| r.mode == mode && r.channel.is_none());
        if used && config.channel_for(mode).is_err() {
            issues.push(format!("A {mode} routine has no channel and none is configured for {mode} mode"));
        }
    }

    for routine in &config.routines {
        if let Err(e) = CronExpr::parse(&routine.schedule) {
            issues.push(format!("Routine '{}': {e}", routine.name));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairbot_config::RoutineConfig;

    #[test]
    fn default_config_lacks_token() {
        let issues = diagnose(&AppConfig::default());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("SLACK_BOT_TOKEN"));
    }

    #[test]
    fn flags_unroutable_routine_and_bad_cron() {
        let mut config = AppConfig::default();
        config.slack.bot_token = Some("xoxb-test".into());
        config.routines.push(RoutineConfig {
            name: "weekly".into(),
            schedule: "0 9 * *".into(),
            mode: GroupMode::Group,
            channel: None,
            enabled: true,
        });

        let issues = diagnose(&config);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("group mode"));
        assert!(issues[1].contains("weekly"));
    }
}
