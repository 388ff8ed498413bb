//! Google Maps client error types.

use std::fmt;

use crate::resolver::ProviderError;

/// Errors from the Google Maps HTTP client.
#[derive(Debug)]
pub enum GoogleError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error HTTP status, or an unexpected `status` field
    ApiError { status: String, message: String },

    /// The API key was rejected (`REQUEST_DENIED`)
    RequestDenied(Option<String>),

    /// Quota exhausted (`OVER_QUERY_LIMIT`)
    OverQueryLimit,

    /// No API key configured
    NotConfigured(String),
}

impl fmt::Display for GoogleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoogleError::Http(e) => write!(f, "HTTP error: {e}"),
            GoogleError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            GoogleError::ApiError { status, message } => write!(f, "API error {status}: {message}"),
            GoogleError::RequestDenied(Some(message)) => write!(f, "request denied: {message}"),
            GoogleError::RequestDenied(None) => write!(f, "request denied"),
            GoogleError::OverQueryLimit => write!(f, "over query limit"),
            GoogleError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for GoogleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GoogleError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GoogleError {
    fn from(err: reqwest::Error) -> Self {
        GoogleError::Http(err)
    }
}

impl From<GoogleError> for ProviderError {
    fn from(err: GoogleError) -> Self {
        match err {
            GoogleError::Json { .. } => ProviderError::Malformed(err.to_string()),
            GoogleError::RequestDenied(_) | GoogleError::NotConfigured(_) => {
                ProviderError::Denied(err.to_string())
            }
            GoogleError::Http(_) | GoogleError::ApiError { .. } | GoogleError::OverQueryLimit => {
                ProviderError::Transport(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(GoogleError::OverQueryLimit.to_string(), "over query limit");

        let err = GoogleError::RequestDenied(Some("The provided API key is invalid.".into()));
        assert_eq!(err.to_string(), "request denied: The provided API key is invalid.");

        let err = GoogleError::ApiError {
            status: "500".into(),
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
    }

    #[test]
    fn json_error_with_body() {
        let err = GoogleError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");
    }

    #[test]
    fn maps_to_provider_error() {
        assert!(matches!(
            ProviderError::from(GoogleError::RequestDenied(None)),
            ProviderError::Denied(_)
        ));
        assert!(matches!(
            ProviderError::from(GoogleError::OverQueryLimit),
            ProviderError::Transport(_)
        ));
        assert!(matches!(
            ProviderError::from(GoogleError::Json { message: "x".into(), body: None }),
            ProviderError::Malformed(_)
        ));
    }
}
