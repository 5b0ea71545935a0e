//! `mailto:` delivery.

use std::sync::Arc;

use tracing::{info, warn};

use gridlead_surface::FormSurface;

use super::{DeliveryKind, DeliveryOutcome, DeliveryStrategy};
use crate::config::LeadFormConfig;
use crate::error::DeliveryError;
use crate::lead::LeadRecord;

/// A fully rendered early-access email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// `mailto:` URI with subject and body percent-encoded.
    pub uri: String,
}

/// Opens the user's mail client with the request pre-filled.
///
/// Whether the message is actually sent cannot be observed, so a successful
/// outcome only says the client was handed the message.
pub struct MailtoComposer {
    recipient: String,
    product: String,
    source: String,
    navigator: Arc<dyn FormSurface>,
}

impl MailtoComposer {
    #[must_use]
    pub fn new(
        recipient: impl Into<String>,
        product: impl Into<String>,
        source: impl Into<String>,
        navigator: Arc<dyn FormSurface>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            product: product.into(),
            source: source.into(),
            navigator,
        }
    }

    #[must_use]
    pub fn from_config(config: &LeadFormConfig, navigator: Arc<dyn FormSurface>) -> Self {
        Self::new(
            config.recipient.clone(),
            config.product.clone(),
            config.source.clone(),
            navigator,
        )
    }

    /// Render `record` into subject, body and URI.
    #[must_use]
    pub fn compose(&self, record: &LeadRecord) -> ComposedMail {
        let subject = format!("{} – Early Access Request ({})", self.product, record.name);
        let body = self.render_body(record);
        let uri = format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body),
        );
        ComposedMail {
            to: self.recipient.clone(),
            subject,
            body,
            uri,
        }
    }

    fn render_body(&self, record: &LeadRecord) -> String {
        let optional = |label: &str, value: &str| {
            (!value.is_empty()).then(|| format!("{label}: {value}"))
        };

        let mut lines = vec![
            format!("Early access request for {}:", self.product),
            String::new(),
            format!("Name: {}", record.name),
            format!("Email: {}", record.email),
        ];
        lines.extend(optional("Role", &record.role));
        lines.extend(optional("Company / Project", &record.org));
        lines.extend(optional("Timeline", &record.timeline));
        lines.extend([
            String::new(),
            format!("What they want to build on {}:", self.product),
            record.usecase.clone(),
            String::new(),
            "---".to_owned(),
            format!("Submitted via {} lead form.", self.source),
        ]);
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl DeliveryStrategy for MailtoComposer {
    fn kind(&self) -> DeliveryKind {
        DeliveryKind::Mailto
    }

    async fn deliver(&self, record: &LeadRecord) -> DeliveryOutcome {
        let mail = self.compose(record);
        info!(to = %mail.to, uri_len = mail.uri.len(), "handing lead to mail client");

        if self.navigator.navigate(&mail.uri) {
            DeliveryOutcome::succeeded(
                DeliveryKind::Mailto,
                "Your email app was opened with the request pre-filled.",
            )
            .with_mail(mail)
        } else {
            warn!("user agent refused the mailto navigation");
            DeliveryOutcome::failed(DeliveryKind::Mailto, &DeliveryError::Navigation).with_mail(mail)
        }
    }
}

impl std::fmt::Debug for MailtoComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailtoComposer")
            .field("recipient", &self.recipient)
            .field("product", &self.product)
            .finish_non_exhaustive()
    }
}
