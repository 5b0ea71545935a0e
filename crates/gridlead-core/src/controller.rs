//! The form controller.
//!
//! One [`FormController`] is attached to a surface at startup and handles
//! every submit trigger for the lifetime of the page:
//!
//! ```text
//! Idle → Validating → Rejected
//!                   ↘ Submitting → Delivered | Failed → Idle
//! ```
//!
//! The synchronous part of a submission (clearing, collecting, validating,
//! disabling the submit control) runs under the state lock, so a second
//! trigger arriving while a delivery is in flight finds the control
//! disabled and is ignored rather than queued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use gridlead_surface::{Confirmation, FieldId, FormSurface, Status, StatusKind};

use crate::config::LeadFormConfig;
use crate::delivery::{self, DeliveryOutcome, DeliveryStrategy};
use crate::error::DeliveryError;
use crate::lead::{self, LeadRecord};
use crate::present;
use crate::report::OutcomeReporter;
use crate::validate::{self, ValidationResult};

/// Status shown when validation fails.
pub const REJECTED_STATUS: &str = "Please complete required fields and confirm consent.";

/// Where the controller is in handling a submission.
///
/// `Rejected` is settled: it stays visible until the next trigger, which is
/// accepted just like one arriving in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Rejected,
    Submitting,
    Delivered,
    Failed,
}

/// What one submit trigger led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Ignored,
    /// Validation failed; errors are shown inline.
    Rejected(ValidationResult),
    /// The strategy reported success.
    Delivered {
        outcome: DeliveryOutcome,
        /// The user's answer to the mailto confirmation, if one was asked.
        confirmation: Option<Confirmation>,
    },
    /// The strategy reported failure.
    Failed(DeliveryOutcome),
}

impl SubmitOutcome {
    /// Whether the lead left the page successfully.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Orchestrates collect → validate → deliver → report.
pub struct FormController {
    surface: Arc<dyn FormSurface>,
    strategy: Arc<dyn DeliveryStrategy>,
    reporter: OutcomeReporter,
    state: Mutex<FormState>,
}

/// Holds the submit control disabled; re-enables it exactly once on drop,
/// whichever way the submission ends.
struct SubmitGuard<'a> {
    surface: &'a dyn FormSurface,
    state: &'a Mutex<FormState>,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.surface.enable_submit();
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = FormState::Idle;
        debug!("submit control re-enabled");
    }
}

enum Prepared<'a> {
    Ignored,
    Rejected(ValidationResult),
    Ready(LeadRecord, SubmitGuard<'a>),
}

impl FormController {
    /// Attach a controller to `surface`.
    ///
    /// Returns `None` when the surface has no form; the pipeline is then
    /// disabled and the rest of the page keeps working.
    pub fn attach(
        surface: Arc<dyn FormSurface>,
        strategy: Arc<dyn DeliveryStrategy>,
        reporter: OutcomeReporter,
    ) -> Option<Self> {
        if !surface.has_form() {
            debug!("no lead form on this surface, pipeline disabled");
            return None;
        }
        info!(delivery = ?strategy.kind(), "lead form attached");
        Some(Self {
            surface,
            strategy,
            reporter,
            state: Mutex::new(FormState::Idle),
        })
    }

    /// Build the strategy and reporter from `config`, then attach.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Client`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &LeadFormConfig,
        surface: Arc<dyn FormSurface>,
    ) -> Result<Option<Self>, DeliveryError> {
        let strategy = delivery::from_config(config, Arc::clone(&surface))?;
        Ok(Self::attach(
            surface,
            strategy,
            OutcomeReporter::from_config(config),
        ))
    }

    /// Current state.
    pub fn state(&self) -> FormState {
        *self.lock_state()
    }

    /// Handle one submit trigger.
    pub async fn submit(&self) -> SubmitOutcome {
        let (record, guard) = match self.prepare() {
            Prepared::Ignored => return SubmitOutcome::Ignored,
            Prepared::Rejected(result) => return SubmitOutcome::Rejected(result),
            Prepared::Ready(record, guard) => (record, guard),
        };

        let kind = self.strategy.kind();
        info!(delivery = ?kind, "submitting lead");
        self.reporter.begin(self.surface.as_ref(), kind);

        let outcome = self.strategy.deliver(&record).await;
        self.set_state(if outcome.succeeded {
            FormState::Delivered
        } else {
            FormState::Failed
        });

        let confirmation = self
            .reporter
            .report(self.surface.as_ref(), &outcome, &record)
            .await;
        drop(guard);

        if outcome.succeeded {
            SubmitOutcome::Delivered {
                outcome,
                confirmation,
            }
        } else {
            SubmitOutcome::Failed(outcome)
        }
    }

    /// The synchronous half of a submission, run under the state lock.
    fn prepare(&self) -> Prepared<'_> {
        let mut state = self.lock_state();
        let busy = matches!(*state, FormState::Validating | FormState::Submitting);
        if busy || !self.surface.submit_enabled() {
            debug!(state = ?*state, "submit ignored while a delivery is in flight");
            return Prepared::Ignored;
        }
        *state = FormState::Validating;

        let surface = self.surface.as_ref();
        surface.set_status(Status::cleared());
        present::clear(surface);

        let record = lead::collect(surface);
        let result = validate::validate(&record);
        if !result.valid {
            let fields: Vec<FieldId> = result.errors.keys().copied().collect();
            warn!(?fields, "lead form validation failed");
            present::present(surface, &result.errors);
            surface.set_status(Status::new(StatusKind::Error, REJECTED_STATUS));
            *state = FormState::Rejected;
            return Prepared::Rejected(result);
        }

        if !surface.try_disable_submit() {
            *state = FormState::Idle;
            return Prepared::Ignored;
        }
        *state = FormState::Submitting;

        Prepared::Ready(
            record,
            SubmitGuard {
                surface,
                state: &self.state,
            },
        )
    }

    fn set_state(&self, next: FormState) {
        let mut state = self.lock_state();
        debug!(from = ?*state, to = ?next, "form state");
        *state = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("delivery", &self.strategy.kind())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
