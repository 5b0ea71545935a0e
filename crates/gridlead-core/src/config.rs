//! Lead form configuration.
//!
//! Loads settings from environment variables with defaults matching the
//! production landing page. All settings can be overridden via
//! `GRIDLEAD_*` environment variables. The `gridlead` CLI reads the same
//! variables through its flags, so a flag always wins over the environment.

use std::time::Duration;

use crate::error::ConfigError;

/// Default recipient of mailto requests.
pub const DEFAULT_RECIPIENT: &str = "info@pressmedia.haus";
/// Product name used in the subject and body.
pub const DEFAULT_PRODUCT: &str = "The Grid";
/// Site named in the body footer.
pub const DEFAULT_SOURCE: &str = "payprofitlearn.com";

/// Pause before the mailto confirmation question, in milliseconds.
pub const DEFAULT_CONFIRM_DELAY_MS: u64 = 600;
/// HTTP request timeout, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// How a valid lead leaves the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Open the user's mail client with a pre-filled message.
    Mailto,
    /// POST the lead as JSON to a form backend.
    Http { endpoint: String },
}

impl DeliveryMode {
    /// Build a mode from its name and an optional endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelivery`] for an unknown name, and
    /// [`ConfigError::MissingEndpoint`] / [`ConfigError::InvalidEndpoint`]
    /// when `http` is chosen without a usable URL.
    pub fn parse(name: &str, endpoint: Option<&str>) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "" | "mailto" | "email" => Ok(Self::Mailto),
            "http" | "https" | "post" => {
                let endpoint = endpoint
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .ok_or(ConfigError::MissingEndpoint)?;
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(ConfigError::InvalidEndpoint {
                        value: endpoint.to_owned(),
                    });
                }
                Ok(Self::Http {
                    endpoint: endpoint.to_owned(),
                })
            }
            other => Err(ConfigError::InvalidDelivery {
                value: other.to_owned(),
            }),
        }
    }

    /// Short name, as accepted by [`DeliveryMode::parse`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mailto => "mailto",
            Self::Http { .. } => "http",
        }
    }
}

/// Lead form configuration.
#[derive(Debug, Clone)]
pub struct LeadFormConfig {
    /// Delivery strategy, fixed for the lifetime of a controller.
    pub delivery: DeliveryMode,
    /// Mailbox that receives mailto requests and is offered as the manual
    /// fallback contact.
    pub recipient: String,
    /// Product name used in the subject and body.
    pub product: String,
    /// Site named in the body footer.
    pub source: String,
    /// Pause between opening the mail client and asking whether it worked.
    pub confirm_delay: Duration,
    /// Request timeout for HTTP delivery.
    pub http_timeout: Duration,
    /// Log filter (e.g., `warn`, `gridlead_core=debug`).
    pub log_level: String,
}

impl Default for LeadFormConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::Mailto,
            recipient: DEFAULT_RECIPIENT.to_owned(),
            product: DEFAULT_PRODUCT.to_owned(),
            source: DEFAULT_SOURCE.to_owned(),
            confirm_delay: Duration::from_millis(DEFAULT_CONFIRM_DELAY_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl LeadFormConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRIDLEAD_DELIVERY` — `mailto` or `http` (default: `mailto`)
    /// - `GRIDLEAD_ENDPOINT` — form backend URL (required for `http`)
    /// - `GRIDLEAD_RECIPIENT` — mailto recipient (default: `info@pressmedia.haus`)
    /// - `GRIDLEAD_PRODUCT` — product name (default: `The Grid`)
    /// - `GRIDLEAD_SOURCE` — footer site name (default: `payprofitlearn.com`)
    /// - `GRIDLEAD_CONFIRM_DELAY_MS` — confirmation delay (default: `600`)
    /// - `GRIDLEAD_HTTP_TIMEOUT_SECS` — HTTP timeout (default: `10`)
    /// - `GRIDLEAD_LOG` — log filter (default: `warn`)
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the delivery settings are inconsistent
    /// or a numeric setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`LeadFormConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = non_empty("GRIDLEAD_ENDPOINT");
        let delivery = match non_empty("GRIDLEAD_DELIVERY") {
            Some(name) => DeliveryMode::parse(&name, endpoint.as_deref())?,
            None => defaults.delivery,
        };

        let confirm_delay = match non_empty("GRIDLEAD_CONFIRM_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_number("GRIDLEAD_CONFIRM_DELAY_MS", &v)?),
            None => defaults.confirm_delay,
        };

        let http_timeout = match non_empty("GRIDLEAD_HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("GRIDLEAD_HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            delivery,
            recipient: non_empty("GRIDLEAD_RECIPIENT").unwrap_or(defaults.recipient),
            product: non_empty("GRIDLEAD_PRODUCT").unwrap_or(defaults.product),
            source: non_empty("GRIDLEAD_SOURCE").unwrap_or(defaults.source),
            confirm_delay,
            http_timeout,
            log_level: non_empty("GRIDLEAD_LOG").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_owned(),
        })
}
