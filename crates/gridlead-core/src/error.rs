//! Error types for `gridlead-core`.
//!
//! Validation problems are not errors here; they travel as a
//! [`ValidationResult`](crate::validate::ValidationResult) and are shown
//! inline. Delivery errors never escape a strategy either: each one is
//! turned into a failed [`DeliveryOutcome`](crate::delivery::DeliveryOutcome)
//! whose detail is the error's display text.

/// Errors from a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The request never got a response (refused, reset, DNS failure).
    ///
    /// The cause is rendered in the message and not chained as a source.
    #[error("could not reach the lead service: {0}")]
    Network(reqwest::Error),

    /// The request timed out.
    #[error("the lead service did not answer in time")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The user agent refused to open the mail client.
    #[error("your email app could not be opened")]
    Navigation,

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(reqwest::Error),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// Errors from loading [`LeadFormConfig`](crate::config::LeadFormConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Unknown delivery strategy name.
    #[error("unknown delivery strategy '{value}' (expected 'mailto' or 'http')")]
    InvalidDelivery { value: String },

    /// HTTP delivery selected without an endpoint.
    #[error("HTTP delivery needs an endpoint — set GRIDLEAD_ENDPOINT or pass --endpoint")]
    MissingEndpoint,

    /// The endpoint is not an `http(s)://` URL.
    #[error("invalid endpoint '{value}': must start with http:// or https://")]
    InvalidEndpoint { value: String },

    /// A numeric setting could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidNumber { key: &'static str, value: String },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn request_error() -> reqwest::Error {
        reqwest::Client::new().get("not a url").build().unwrap_err()
    }

    #[test]
    fn network_cause_is_rendered_once() {
        let cause = request_error().to_string();
        let err = DeliveryError::from(request_error());

        assert!(matches!(err, DeliveryError::Network(_)));
        assert!(err.source().is_none());
        let rendered = err.to_string();
        assert_eq!(rendered.matches(cause.as_str()).count(), 1, "{rendered}");
    }

    #[test]
    fn client_cause_is_not_chained() {
        let err = DeliveryError::Client(request_error());
        assert!(err.source().is_none());
        assert!(err.to_string().starts_with("HTTP client setup failed: "));
    }

    #[test]
    fn rejected_displays_only_the_message() {
        let err = DeliveryError::Rejected {
            status: 500,
            message: "db down".to_owned(),
        };
        assert_eq!(err.to_string(), "db down");
    }
}
