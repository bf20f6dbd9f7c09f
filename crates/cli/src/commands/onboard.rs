//! `pairbot onboard` — First-time setup.

use std::path::Path;

use pairbot_config::AppConfig;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = super::config_path(config_path);

    println!("🤝 PairBot — First-Time Setup");
    println!("=============================\n");

    if let Some(dir) = config_path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        } else {
            println!("  Config directory exists: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set SLACK_BOT_TOKEN (or slack.bot_token in the config)");
    println!("   2. Set PAIRING_CHANNEL (or pairing_channel in the config)");
    println!("   3. Try it: pairbot run --mode pairing --dry-run");
    println!("   4. Schedule it: pairbot daemon\n");

    Ok(())
}
