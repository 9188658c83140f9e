use std::time::Duration;

/// Everything that can turn a request into a 500.
///
/// The `Display` text is for logs only. Callers see [`ProxyError::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),
    #[error("invalid configuration value {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
    #[error("offer feed request failed: {0}")]
    Transport(String),
    #[error("offer feed did not respond within {0:?}")]
    Timeout(Duration),
    #[error("offer feed returned HTTP {0}")]
    UpstreamStatus(u16),
    #[error("offer feed payload is not valid JSON: {0}")]
    MalformedPayload(String),
    #[error("worker runtime error: {0}")]
    Runtime(String),
}

impl ProxyError {
    /// Sanitized text safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::Timeout(_) | Self::UpstreamStatus(_) => {
                "Offer feed is currently unavailable."
            }
            Self::MalformedPayload(_) => "Offer feed returned an invalid response.",
            Self::MissingConfig(_) | Self::InvalidConfig { .. } | Self::Runtime(_) => {
                "Internal server error."
            }
        }
    }
}

impl From<worker::Error> for ProxyError {
    fn from(e: worker::Error) -> Self {
        Self::Runtime(e.to_string())
    }
}
