//! Error type shared by the fetch, extract and lookup stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The server answered with anything other than 200.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Connection failure, timeout, or an unreadable body.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A row link with its own scheme or host.
    #[error("link {link:?} points outside the vulnerability database")]
    ForeignLink { link: String },

    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid CSS selector {selector:?} for {field}: {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl LookupError {
    /// HTTP status code, when the error came from a non-200 response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LookupError::Status { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_code() {
        let err = LookupError::Status {
            url: "https://security.snyk.io/package/npm/lodash/0.0.0".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };

        assert!(err.to_string().contains("404"));
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_selector_error_names_field() {
        let err = LookupError::InvalidSelector {
            field: "row",
            selector: "tr..".to_string(),
            reason: "unexpected token".to_string(),
        };

        assert!(err.to_string().contains("row"));
        assert_eq!(err.status_code(), None);
    }
}
