//! Dry-run conversation sink.
//!
//! Logs every group instead of messaging anyone, and keeps a copy of what it
//! saw. Used by `pairbot run --dry-run`.

use async_trait::async_trait;
use pairbot_core::error::ChannelError;
use pairbot_core::{ChannelId, ConversationSink, Group, GroupMode, MemberId};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::templates;

#[derive(Default)]
pub struct LogSink {
    created: Mutex<Vec<(Group, GroupMode)>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups "created" so far, in dispatch order.
    pub fn created(&self) -> Vec<(Group, GroupMode)> {
        self.records().clone()
    }

    // Pushes are single and complete, so a poisoned list is still consistent.
    fn records(&self) -> MutexGuard<'_, Vec<(Group, GroupMode)>> {
        self.created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ConversationSink for LogSink {
    async fn create_conversation(
        &self,
        members: &[MemberId],
        mode: GroupMode,
        source: &ChannelId,
    ) -> Result<(), ChannelError> {
        info!(
            %mode,
            %source,
            size = members.len(),
            intro = %templates::intro_text(members, mode, source),
            "Dry run: would open conversation"
        );
        self.records().push((members.to_vec(), mode));
        Ok(())
    }
}
