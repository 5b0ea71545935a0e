//! JSON POST delivery to a form backend.

use std::time::Duration;

use reqwest::header::ACCEPT;
use tracing::{info, warn};

use super::{DeliveryKind, DeliveryOutcome, DeliveryStrategy};
use crate::error::DeliveryError;
use crate::lead::LeadRecord;

const USER_AGENT: &str = concat!("gridlead/", env!("CARGO_PKG_VERSION"));

/// Posts a lead as JSON, once.
#[derive(Debug, Clone)]
pub struct HttpPoster {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpPoster {
    /// Create a poster for `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Client`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(DeliveryError::Client)?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, record: &LeadRecord) -> Result<(), DeliveryError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(record)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // Body is best effort; a broken body still yields the status message.
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("server returned {}", status.as_u16()));

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl DeliveryStrategy for HttpPoster {
    fn kind(&self) -> DeliveryKind {
        DeliveryKind::Http
    }

    async fn deliver(&self, record: &LeadRecord) -> DeliveryOutcome {
        match self.post(record).await {
            Ok(()) => {
                info!(endpoint = %self.endpoint, "lead accepted");
                DeliveryOutcome::succeeded(
                    DeliveryKind::Http,
                    "Thanks! Your early access request is in. We'll be in touch soon.",
                )
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "lead delivery failed");
                DeliveryOutcome::failed(DeliveryKind::Http, &err)
            }
        }
    }
}
