//! Shuffle-then-chunk partitioning with trailing-group correction.

use pairbot_core::{Group, GroupMode, MemberId};
use rand::Rng;
use rand::seq::SliceRandom;

/// Target size in pairing mode; also the smallest group a rebalance leaves behind.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;

/// Target size in general grouping mode.
pub const DEFAULT_MAX_GROUP_SIZE: usize = 4;

/// Partitions rosters into bounded-size groups.
///
/// The sizes are fields rather than globals so differently configured
/// groupers can live side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouper {
    /// Chunk size in pairing mode and the rebalance threshold.
    pub min_group_size: usize,
    /// Chunk size in general grouping mode.
    pub max_group_size: usize,
}

impl Grouper {
    pub fn new(min_group_size: usize, max_group_size: usize) -> Self {
        Self {
            min_group_size,
            max_group_size,
        }
    }

    /// Build a grouper from the `[grouping]` config section.
    pub fn from_config(config: &pairbot_config::GroupingConfig) -> Self {
        Self::new(config.min_group_size, config.max_group_size)
    }

    /// Chunk size used for `mode`.
    pub fn group_size(&self, mode: GroupMode) -> usize {
        match mode {
            GroupMode::Pairing => self.min_group_size,
            GroupMode::Group => self.max_group_size,
        }
    }

    /// Shuffle `members` uniformly and split them into chunks of `group_size`.
    ///
    /// Every chunk but the last holds exactly `group_size` members; the last
    /// holds the remainder. An empty roster yields no groups.
    ///
    /// # Panics
    ///
    /// Panics if `group_size` is zero.
    pub fn partition<T>(&self, members: Vec<T>, group_size: usize) -> Vec<Vec<T>> {
        self.partition_with(members, group_size, &mut rand::rng())
    }

    /// [`partition`](Self::partition) with an explicit random source.
    pub fn partition_with<T, R>(&self, mut members: Vec<T>, group_size: usize, rng: &mut R) -> Vec<Vec<T>>
    where
        R: Rng + ?Sized,
    {
        assert!(group_size > 0, "group_size must be at least 1");
        members.shuffle(rng);

        let mut groups: Vec<Vec<T>> = Vec::with_capacity(members.len().div_ceil(group_size));
        let mut rest = members.into_iter().peekable();
        while rest.peek().is_some() {
            groups.push(rest.by_ref().take(group_size).collect());
        }
        groups
    }

    /// Fold an undersized trailing group into the group before it.
    ///
    /// Applies only when there are at least two groups and the last one is
    /// below `min_group_size`. A lone undersized group has no neighbor and
    /// is returned as-is.
    pub fn rebalance_trailing_group<T>(&self, mut groups: Vec<Vec<T>>) -> Vec<Vec<T>> {
        if groups.len() < 2 {
            return groups;
        }

        let undersized = groups
            .last()
            .is_some_and(|last| last.len() < self.min_group_size);
        if !undersized {
            return groups;
        }

        if let Some(tail) = groups.pop() {
            // len >= 2 was checked above, so a neighbor exists
            if let Some(neighbor) = groups.last_mut() {
                neighbor.extend(tail);
            }
        }
        groups
    }

    /// Partition a roster of members into groups of `group_size`.
    ///
    /// No rebalancing is applied; see [`groups_for`](Self::groups_for).
    pub fn form_groups(&self, members: Vec<MemberId>, group_size: usize) -> Vec<Group> {
        self.partition(members, group_size)
    }

    /// Form the groups for a run in `mode`: pairing mode is rebalanced,
    /// general grouping mode is left as chunked.
    pub fn groups_for(&self, members: Vec<MemberId>, mode: GroupMode) -> Vec<Group> {
        let groups = self.form_groups(members, self.group_size(mode));
        match mode {
            GroupMode::Pairing => self.rebalance_trailing_group(groups),
            GroupMode::Group => groups,
        }
    }
}

impl Default for Grouper {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_GROUP_SIZE, DEFAULT_MAX_GROUP_SIZE)
    }
}
