//! Error types for the PairBot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all PairBot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Channel errors ---
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Scheduling errors ---
    #[error("Schedule error: {0}")]
    Schedule(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by a chat platform collaborator.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    #[error("Could not fetch members of {channel}: {reason}")]
    MembersUnavailable { channel: String, reason: String },

    #[error("Conversation delivery failed in {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Platform API call {method} failed: {error}")]
    Api { method: String, error: String },

    #[error("Rate limited by platform, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_error_displays_correctly() {
        let err = Error::Channel(ChannelError::Api {
            method: "conversations.open".into(),
            error: "user_not_found".into(),
        });
        assert!(err.to_string().contains("conversations.open"));
        assert!(err.to_string().contains("user_not_found"));
    }

    #[test]
    fn members_unavailable_names_channel() {
        let err: Error = ChannelError::MembersUnavailable {
            channel: "C123".into(),
            reason: "channel_not_found".into(),
        }
        .into();
        assert!(matches!(err, Error::Channel(_)));
        assert!(err.to_string().contains("C123"));
    }

    #[test]
    fn every_variant_names_its_context() {
        let errors = [
            Error::from(ChannelError::Network("connection reset".into())),
            Error::Config {
                message: "pairing_channel is not set".into(),
            },
            Error::Schedule("Expected 5 fields".into()),
        ];

        for err in errors {
            // no wildcard arm: a new variant must be added here too
            let prefix = match &err {
                Error::Channel(_) => "Channel error",
                Error::Config { .. } => "Configuration error",
                Error::Schedule(_) => "Schedule error",
            };
            assert!(err.to_string().starts_with(prefix), "{err}");
        }
    }
}
