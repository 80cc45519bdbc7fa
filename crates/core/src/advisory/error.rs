//! Advisory failure classification.
//!
//! None of these reach callers of the generator: each maps to a fixed note
//! that is returned in place of generated text.

use thiserror::Error;

/// Note returned when the generator is configured offline.
pub const OFFLINE_NOTE: &str = "No internet connection. The app works offline, \
    but the advisory note needs a connection.";
/// Note returned when no API key is configured.
pub const MISSING_KEY_NOTE: &str = "API key missing. Cannot generate analysis.";
/// Note returned when the service cannot be reached or answers with an error.
pub const UNREACHABLE_NOTE: &str =
    "Could not reach the advisory service. Check your internet connection.";
/// Note returned when the service answers without any text.
pub const EMPTY_NOTE: &str = "No response received from the advisory service.";

/// Why an advisory request produced no generated text.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    /// Network use disabled by configuration.
    #[error("advisor is offline")]
    Offline,

    /// No API key configured.
    #[error("advisor API key is not configured")]
    MissingApiKey,

    /// Connection, TLS, or body decoding failure.
    #[error("advisory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("advisory service returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Success status but no text in the answer.
    #[error("advisory service returned no text")]
    EmptyResponse,
}

impl AdvisoryError {
    /// The note returned to the caller instead of generated text.
    #[must_use]
    pub fn fallback_note(&self) -> &'static str {
        match self {
            Self::Offline => OFFLINE_NOTE,
            Self::MissingApiKey => MISSING_KEY_NOTE,
            Self::Transport(_) | Self::Http { .. } => UNREACHABLE_NOTE,
            Self::EmptyResponse => EMPTY_NOTE,
        }
    }

    /// Returns true for failures of an attempted remote call, as opposed to
    /// the generator being switched off or unconfigured.
    #[must_use]
    pub fn is_call_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. } | Self::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_notes() {
        assert_eq!(AdvisoryError::Offline.fallback_note(), OFFLINE_NOTE);
        assert_eq!(AdvisoryError::MissingApiKey.fallback_note(), MISSING_KEY_NOTE);
        assert_eq!(AdvisoryError::EmptyResponse.fallback_note(), EMPTY_NOTE);
        let http = AdvisoryError::Http {
            status: 503,
            body: String::new(),
        };
        assert_eq!(http.fallback_note(), UNREACHABLE_NOTE);
        assert!(http.is_call_failure());
        assert!(!AdvisoryError::MissingApiKey.is_call_failure());
    }
}
