//! Collaborator traits — the abstraction over chat platforms.
//!
//! The grouping job never talks to a platform directly. It reads a roster
//! through a [`MemberSource`] and opens conversations through a
//! [`ConversationSink`]. A single adapter (e.g. Slack) usually implements both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::member::{GroupMode, MemberId};

/// Platform identifier of a channel whose members get grouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Supplies the roster of a channel.
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Return every member of `channel` at call time.
    ///
    /// Callers assume the list is deduplicated and complete; uniqueness is
    /// not re-checked downstream.
    async fn get_channel_members(
        &self,
        channel: &ChannelId,
    ) -> std::result::Result<Vec<MemberId>, ChannelError>;
}

/// Opens a conversation for one group.
#[async_trait]
pub trait ConversationSink: Send + Sync {
    /// Start a conversation between `members`, introduced according to `mode`.
    ///
    /// `source` is the channel the group was drawn from.
    async fn create_conversation(
        &self,
        members: &[MemberId],
        mode: GroupMode,
        source: &ChannelId,
    ) -> std::result::Result<(), ChannelError>;
}
