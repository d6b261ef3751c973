//! Error types for the HTTP client.

/// Errors that can occur when fetching a chart page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or the body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status; carries a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The target URL did not parse.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Whether a caller could reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidUrl { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_retryability() {
        let throttled = Error::HttpStatus {
            status: 429,
            body: String::new(),
        };
        let unavailable = Error::HttpStatus {
            status: 503,
            body: String::new(),
        };
        let missing = Error::HttpStatus {
            status: 404,
            body: String::new(),
        };
        assert!(throttled.is_retryable());
        assert!(unavailable.is_retryable());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn invalid_url_is_not_retryable() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = Error::InvalidUrl {
            url: "not a url".into(),
            source,
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("invalid url 'not a url'"));
    }
}
