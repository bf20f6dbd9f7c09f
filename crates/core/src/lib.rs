//! # PairBot Core
//!
//! Domain types, collaborator traits, and error definitions for PairBot.
//! This crate has **no I/O** — it defines the model that the grouping job,
//! the chat platform adapters, and the scheduler all build against.
//!
//! ## Collaborators
//!
//! The grouping job talks to the outside world through two traits:
//! - [`MemberSource`] — fetches a channel's roster
//! - [`ConversationSink`] — opens one conversation per formed group
//!
//! Implementations live in `pairbot-channels`; tests use in-memory mocks.

pub mod channel;
pub mod error;
pub mod member;

// Re-export key types at crate root for ergonomics
pub use channel::{ChannelId, ConversationSink, MemberSource};
pub use error::{ChannelError, Error, Result};
pub use member::{Group, GroupMode, MemberId};
