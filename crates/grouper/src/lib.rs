//! Group formation for PairBot.
//!
//! - [`Grouper`] shuffles a roster, chunks it into groups of a target size,
//!   and folds an undersized trailing group into its neighbor.
//! - [`GroupingJob`] wires a grouper to a member source and a conversation
//!   sink: fetch → partition → rebalance (pairing only) → dispatch.

pub mod grouper;
pub mod job;

pub use grouper::{DEFAULT_MAX_GROUP_SIZE, DEFAULT_MIN_GROUP_SIZE, Grouper};
pub use job::GroupingJob;
