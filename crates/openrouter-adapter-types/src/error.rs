// Error hierarchy: one error type for configuration, validation, decode and exit failures.

use serde::{Deserialize, Serialize};

/// Discriminator for every failure the adapter can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Adapter-side errors
    Configuration,
    Validation,
    Decode,

    // Provider errors (from the exit status)
    Authentication,
    AccessDenied,
    NotFound,
    InvalidRequest,
    RateLimit,
    Server,
    QuotaExceeded,
}

impl ErrorKind {
    /// Returns `true` if this kind was derived from an HTTP exit status.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::AccessDenied
                | Self::NotFound
                | Self::InvalidRequest
                | Self::RateLimit
                | Self::Server
                | Self::QuotaExceeded
        )
    }
}

/// The single error type for the adapter crates.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    /// Schema entry that failed validation.
    pub parameter: Option<String>,
    pub status_code: Option<u16>,
    pub raw: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            parameter: None,
            status_code: None,
            raw: None,
        }
    }

    /// Convenience: configuration error (bad template, missing secret, bad header).
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Convenience: a parameter value was rejected. `reason` is kept verbatim
    /// so the host can show it to the user as-is.
    pub fn validation(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: Some(parameter.into()),
            ..Self::new(ErrorKind::Validation, reason)
        }
    }

    /// Convenience: decode error with the JSON error as source.
    pub fn decode(raw: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            source: Some(Box::new(source)),
            raw: Some(raw.into()),
            ..Self::new(ErrorKind::Decode, "Failed to decode chunk")
        }
    }

    /// Construct from the final HTTP status of an exchange.
    pub fn from_http_status(status: u16, message: impl Into<String>, body: &str) -> Self {
        let message = message.into();
        let kind = match status {
            400 | 413 | 422 => ErrorKind::InvalidRequest,
            401 => ErrorKind::Authentication,
            402 => ErrorKind::QuotaExceeded,
            403 => ErrorKind::AccessDenied,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimit,
            _ => ErrorKind::Server,
        };
        let kind = Self::classify_by_message(&message, kind);

        Self {
            status_code: Some(status),
            raw: Some(body.to_string()),
            ..Self::new(kind, message)
        }
    }

    fn classify_by_message(message: &str, default: ErrorKind) -> ErrorKind {
        let lower = message.to_lowercase();
        if lower.contains("no auth credentials") || lower.contains("invalid api key") {
            ErrorKind::Authentication
        } else if lower.contains("insufficient credits") || lower.contains("quota") {
            ErrorKind::QuotaExceeded
        } else if lower.contains("is not a valid model") || lower.contains("model not found") {
            ErrorKind::NotFound
        } else {
            default
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{:?}: {}: {}", self.kind, parameter, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
