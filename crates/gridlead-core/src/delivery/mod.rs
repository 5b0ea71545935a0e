//! Delivery strategies.
//!
//! A [`DeliveryStrategy`] turns a valid [`LeadRecord`] into one outbound
//! action and reports how it went. The strategy is chosen once from
//! [`LeadFormConfig`] when the controller is built; nothing about the record
//! influences the choice.
//!
//! - [`MailtoComposer`] — opens the user's mail client with a pre-filled
//!   message. Success only means the client was handed the message.
//! - [`HttpPoster`] — one JSON POST to a form backend.

mod http;
mod mailto;

use std::sync::Arc;

use serde::Serialize;

use gridlead_surface::FormSurface;

use crate::config::{DeliveryMode, LeadFormConfig};
use crate::error::DeliveryError;
use crate::lead::LeadRecord;

pub use http::HttpPoster;
pub use mailto::{ComposedMail, MailtoComposer};

/// Which strategy produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Mailto,
    Http,
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub succeeded: bool,
    /// Human-readable description, shown to the user.
    pub detail: String,
    pub kind: DeliveryKind,
    /// The composed message, for mailto attempts.
    pub mail: Option<ComposedMail>,
}

impl DeliveryOutcome {
    /// A successful attempt.
    #[must_use]
    pub fn succeeded(kind: DeliveryKind, detail: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            detail: detail.into(),
            kind,
            mail: None,
        }
    }

    /// A failed attempt, described by `err`.
    #[must_use]
    pub fn failed(kind: DeliveryKind, err: &DeliveryError) -> Self {
        Self {
            succeeded: false,
            detail: err.to_string(),
            kind,
            mail: None,
        }
    }

    /// Attach the composed message.
    #[must_use]
    pub fn with_mail(mut self, mail: ComposedMail) -> Self {
        self.mail = Some(mail);
        self
    }
}

/// The interchangeable mechanism that transmits a lead.
///
/// Implementations never return an error: every failure is folded into a
/// [`DeliveryOutcome`] with `succeeded == false`. Each call is exactly one
/// attempt; there are no retries.
#[async_trait::async_trait]
pub trait DeliveryStrategy: Send + Sync {
    fn kind(&self) -> DeliveryKind;

    /// Send `record`.
    async fn deliver(&self, record: &LeadRecord) -> DeliveryOutcome;
}

/// Build the strategy selected by `config`.
///
/// `surface` is the user agent the mailto strategy navigates.
///
/// # Errors
///
/// Returns [`DeliveryError::Client`] if the HTTP client cannot be built.
pub fn from_config(
    config: &LeadFormConfig,
    surface: Arc<dyn FormSurface>,
) -> Result<Arc<dyn DeliveryStrategy>, DeliveryError> {
    Ok(match &config.delivery {
        DeliveryMode::Mailto => Arc::new(MailtoComposer::from_config(config, surface)),
        DeliveryMode::Http { endpoint } => {
            Arc::new(HttpPoster::new(endpoint.clone(), config.http_timeout)?)
        }
    })
}
