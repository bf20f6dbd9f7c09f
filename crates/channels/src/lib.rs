//! Chat platform adapters for PairBot.
//!
//! Each adapter implements the collaborator traits from `pairbot-core`
//! so the grouping job stays platform-agnostic.
//!
//! Available adapters:
//! - **Slack** — Web API client: channel roster + group DMs
//! - **Log** — Dry-run sink that logs and records groups instead of messaging
//! - **Templates** — Block Kit intro messages sent to each new conversation

pub mod log_sink;
pub mod slack;
pub mod templates;

pub use log_sink::LogSink;
pub use slack::SlackClient;
