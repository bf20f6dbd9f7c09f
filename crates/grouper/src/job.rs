//! The grouping job: roster in, one conversation per group out.

use std::sync::Arc;

use pairbot_core::error::ChannelError;
use pairbot_core::{ChannelId, ConversationSink, Group, GroupMode, MemberSource};
use tracing::{debug, info};

use crate::grouper::Grouper;

/// Runs one grouping pass against a member source and a conversation sink.
///
/// Collaborator calls are awaited strictly one after another; a run never
/// has more than one outstanding call.
pub struct GroupingJob {
    grouper: Grouper,
    members: Arc<dyn MemberSource>,
    sink: Arc<dyn ConversationSink>,
}

impl GroupingJob {
    pub fn new(
        grouper: Grouper,
        members: Arc<dyn MemberSource>,
        sink: Arc<dyn ConversationSink>,
    ) -> Self {
        Self {
            grouper,
            members,
            sink,
        }
    }

    pub fn grouper(&self) -> &Grouper {
        &self.grouper
    }

    /// Open one conversation per group, in order, each introduced as coming
    /// from `source`.
    ///
    /// The first failure aborts the remaining groups and is returned as-is.
    pub async fn dispatch(
        &self,
        groups: &[Group],
        mode: GroupMode,
        source: &ChannelId,
    ) -> Result<(), ChannelError> {
        for (index, group) in groups.iter().enumerate() {
            debug!(index, size = group.len(), %mode, %source, "Creating conversation");
            self.sink.create_conversation(group, mode, source).await?;
        }
        Ok(())
    }

    /// Fetch the roster of `channel`, group it for `mode`, and dispatch.
    ///
    /// Returns the groups that were dispatched. A member-source failure is
    /// propagated before anything is dispatched.
    pub async fn run(&self, channel: &ChannelId, mode: GroupMode) -> pairbot_core::Result<Vec<Group>> {
        info!(%channel, %mode, "Running grouping job");

        let members = self.members.get_channel_members(channel).await?;
        debug!(%channel, members = members.len(), "Fetched channel members");

        let groups = self.grouper.groups_for(members, mode);
        self.dispatch(&groups, mode, channel).await?;

        info!(%channel, %mode, conversations = groups.len(), "Started conversations");
        Ok(groups)
    }
}
