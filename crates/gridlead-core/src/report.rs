//! Status reporting around a delivery attempt.
//!
//! The reporter owns every user-visible message after validation: the
//! pending line while a delivery is in flight, the success or error line
//! afterwards, and for mailto the follow-up dialog that asks whether the
//! email actually went out. Each call replaces the status line, so success
//! and error are never shown together.

use std::time::Duration;

use tracing::{debug, info};

use gridlead_surface::{Confirmation, ConfirmationPrompt, FormSurface, Status, StatusKind};

use crate::config::LeadFormConfig;
use crate::delivery::{DeliveryKind, DeliveryOutcome};
use crate::lead::LeadRecord;

/// Shows delivery progress and results on a surface.
#[derive(Debug, Clone)]
pub struct OutcomeReporter {
    contact: String,
    confirm_delay: Duration,
}

impl OutcomeReporter {
    #[must_use]
    pub fn new(contact: impl Into<String>, confirm_delay: Duration) -> Self {
        Self {
            contact: contact.into(),
            confirm_delay,
        }
    }

    #[must_use]
    pub fn from_config(config: &LeadFormConfig) -> Self {
        Self::new(config.recipient.clone(), config.confirm_delay)
    }

    /// Show the busy line for a delivery of `kind`.
    pub fn begin<S: FormSurface + ?Sized>(&self, surface: &S, kind: DeliveryKind) {
        let text = match kind {
            DeliveryKind::Mailto => {
                "Opening your email app. Please press send to complete the request."
            }
            DeliveryKind::Http => "Sending your request…",
        };
        surface.set_status(Status::new(StatusKind::Pending, text));
    }

    /// Show the result of a delivery.
    ///
    /// For a dispatched mailto this waits for the user's answer in the
    /// confirmation dialog and returns it; otherwise returns `None`.
    pub async fn report<S: FormSurface + ?Sized>(
        &self,
        surface: &S,
        outcome: &DeliveryOutcome,
        record: &LeadRecord,
    ) -> Option<Confirmation> {
        if !outcome.succeeded {
            surface.set_status(Status::new(
                StatusKind::Error,
                format!(
                    "Sorry, something went wrong: {}. Please try again or email {}.",
                    outcome.detail.trim_end_matches('.'),
                    self.contact
                ),
            ));
            return None;
        }

        match outcome.kind {
            DeliveryKind::Http => {
                surface.set_status(Status::new(StatusKind::Success, outcome.detail.clone()));
                surface.reset();
                info!("lead delivered, form reset");
                None
            }
            DeliveryKind::Mailto => {
                surface.set_status(Status::new(
                    StatusKind::Success,
                    "We opened your email app. Press send to complete your request.",
                ));
                let mail = outcome.mail.as_ref()?;

                if !self.confirm_delay.is_zero() {
                    tokio::time::sleep(self.confirm_delay).await;
                }
                let prompt = ConfirmationPrompt {
                    body: mail.body.clone(),
                    reopen_uri: mail.uri.clone(),
                    contact: self.contact.clone(),
                };
                let answer = surface.confirm(&prompt).await;
                debug!(?answer, "mailto confirmation answered");
                self.apply_confirmation(surface, answer, &prompt, record);
                Some(answer)
            }
        }
    }

    fn apply_confirmation<S: FormSurface + ?Sized>(
        &self,
        surface: &S,
        answer: Confirmation,
        prompt: &ConfirmationPrompt,
        record: &LeadRecord,
    ) {
        match answer {
            Confirmation::Sent => {
                surface.reset();
                surface.set_status(Status::new(
                    StatusKind::Success,
                    format!("Thanks, {}! We'll be in touch soon.", record.name),
                ));
            }
            Confirmation::CouldNotSend => {
                let text = if surface.copy_to_clipboard(&prompt.body) {
                    format!(
                        "No problem. Your request was copied to the clipboard; paste it into an email to {}.",
                        self.contact
                    )
                } else {
                    format!("No problem. Please email your request to {}.", self.contact)
                };
                surface.set_status(Status::new(StatusKind::Error, text));
            }
            Confirmation::Dismissed => {}
        }
    }
}
