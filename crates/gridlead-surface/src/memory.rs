//! In-memory surface.
//!
//! Holds the whole page state behind a `Mutex` so tests can drive the
//! pipeline and then inspect exactly what a user would have seen. Clones
//! share state, which lets a test keep a handle while the controller owns
//! another one. Headless front ends use it as their state store and add
//! their own output on top.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Confirmation, ConfirmationPrompt, FieldId, FormSurface, Status};

/// Statuses kept for [`MemorySurface::status_history`]; older ones are dropped.
pub const STATUS_HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone, Default)]
struct Control {
    value: String,
    checked: bool,
    error_text: String,
    aria_invalid: bool,
    described_by: Option<String>,
}

#[derive(Debug)]
struct Inner {
    form_present: bool,
    controls: BTreeMap<FieldId, Control>,
    status: Status,
    status_history: Vec<Status>,
    busy: bool,
    navigation_allowed: bool,
    navigations: Vec<String>,
    clipboard_available: bool,
    clipboard: Option<String>,
    confirmation: Confirmation,
    prompts: Vec<ConfirmationPrompt>,
    resets: usize,
    enables: usize,
}

/// A page kept entirely in memory.
///
/// # Examples
///
/// ```
/// use gridlead_surface::{FieldId, FormSurface, MemorySurface};
///
/// let surface = MemorySurface::new().with_value(FieldId::Name, "  Ada ");
/// assert_eq!(surface.text_value(FieldId::Name).as_deref(), Some("  Ada "));
/// assert!(surface.try_disable_submit());
/// assert!(!surface.try_disable_submit());
/// ```
#[derive(Debug, Clone)]
pub struct MemorySurface {
    inner: Arc<Mutex<Inner>>,
    submit_disabled: Arc<AtomicBool>,
}

impl MemorySurface {
    /// A page with the form and every control present and empty.
    #[must_use]
    pub fn new() -> Self {
        let controls = FieldId::ALL
            .into_iter()
            .map(|f| (f, Control::default()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                form_present: true,
                controls,
                status: Status::cleared(),
                status_history: Vec::new(),
                busy: false,
                navigation_allowed: true,
                navigations: Vec::new(),
                clipboard_available: true,
                clipboard: None,
                confirmation: Confirmation::Sent,
                prompts: Vec::new(),
                resets: 0,
                enables: 0,
            })),
            submit_disabled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Builders ─────────────────────────────────────────────────────

    /// Remove the form element entirely.
    #[must_use]
    pub fn without_form(self) -> Self {
        self.lock().form_present = false;
        self
    }

    /// Remove one control from the form.
    #[must_use]
    pub fn without_control(self, field: FieldId) -> Self {
        self.lock().controls.remove(&field);
        self
    }

    #[must_use]
    pub fn with_value(self, field: FieldId, value: impl Into<String>) -> Self {
        self.set_value(field, value);
        self
    }

    #[must_use]
    pub fn with_checked(self, field: FieldId, checked: bool) -> Self {
        self.set_checked(field, checked);
        self
    }

    /// Answer the confirmation dialog with `answer`.
    #[must_use]
    pub fn with_confirmation(self, answer: Confirmation) -> Self {
        self.lock().confirmation = answer;
        self
    }

    /// Refuse every navigation, like a blocked launcher.
    #[must_use]
    pub fn with_navigation_blocked(self) -> Self {
        self.lock().navigation_allowed = false;
        self
    }

    #[must_use]
    pub fn without_clipboard(self) -> Self {
        self.lock().clipboard_available = false;
        self
    }

    // ── Mutators ─────────────────────────────────────────────────────

    /// Type into a control. Ignored if the control is absent.
    pub fn set_value(&self, field: FieldId, value: impl Into<String>) {
        if let Some(c) = self.lock().controls.get_mut(&field) {
            c.value = value.into();
        }
    }

    /// Tick or untick a control. Ignored if the control is absent.
    pub fn set_checked(&self, field: FieldId, checked: bool) {
        if let Some(c) = self.lock().controls.get_mut(&field) {
            c.checked = checked;
        }
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The status line as currently shown.
    #[must_use]
    pub fn status(&self) -> Status {
        self.lock().status.clone()
    }

    /// The most recent statuses shown, oldest first, at most
    /// [`STATUS_HISTORY_LIMIT`] of them.
    #[must_use]
    pub fn status_history(&self) -> Vec<Status> {
        self.lock().status_history.clone()
    }

    /// Text in the field's error slot, if any.
    #[must_use]
    pub fn field_error(&self, field: FieldId) -> Option<String> {
        self.lock()
            .controls
            .get(&field)
            .map(|c| c.error_text.clone())
            .filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn is_marked_invalid(&self, field: FieldId) -> bool {
        self.lock()
            .controls
            .get(&field)
            .is_some_and(|c| c.aria_invalid)
    }

    #[must_use]
    pub fn described_by(&self, field: FieldId) -> Option<String> {
        self.lock()
            .controls
            .get(&field)
            .and_then(|c| c.described_by.clone())
    }

    /// Whether the submit control carries the busy marker.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    /// URIs the page tried to navigate to, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    #[must_use]
    pub fn clipboard(&self) -> Option<String> {
        self.lock().clipboard.clone()
    }

    /// Confirmation dialogs opened so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.lock().prompts.clone()
    }

    /// How many times the form was reset.
    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.lock().resets
    }

    /// How many times the submit control was re-enabled.
    #[must_use]
    pub fn enable_count(&self) -> usize {
        self.lock().enables
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FormSurface for MemorySurface {
    fn has_form(&self) -> bool {
        self.lock().form_present
    }

    fn has_control(&self, field: FieldId) -> bool {
        self.lock().controls.contains_key(&field)
    }

    fn text_value(&self, field: FieldId) -> Option<String> {
        self.lock().controls.get(&field).map(|c| c.value.clone())
    }

    fn is_checked(&self, field: FieldId) -> Option<bool> {
        self.lock().controls.get(&field).map(|c| c.checked)
    }

    fn show_field_error(&self, field: FieldId, message: &str) {
        if let Some(c) = self.lock().controls.get_mut(&field) {
            c.error_text = message.to_owned();
            c.aria_invalid = true;
            c.described_by = Some(field.error_slot_id());
        }
    }

    fn clear_field_error(&self, field: FieldId) {
        if let Some(c) = self.lock().controls.get_mut(&field) {
            c.error_text.clear();
            c.aria_invalid = false;
            c.described_by = None;
        }
    }

    fn set_status(&self, status: Status) {
        let mut inner = self.lock();
        if inner.status_history.len() == STATUS_HISTORY_LIMIT {
            inner.status_history.remove(0);
        }
        inner.status_history.push(status.clone());
        inner.status = status;
    }

    fn try_disable_submit(&self) -> bool {
        let acquired = self
            .submit_disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if acquired {
            self.lock().busy = true;
        }
        acquired
    }

    fn enable_submit(&self) {
        let mut inner = self.lock();
        inner.busy = false;
        inner.enables += 1;
        drop(inner);
        self.submit_disabled.store(false, Ordering::Release);
    }

    fn submit_enabled(&self) -> bool {
        !self.submit_disabled.load(Ordering::Acquire)
    }

    fn reset(&self) {
        let mut inner = self.lock();
        for c in inner.controls.values_mut() {
            c.value.clear();
            c.checked = false;
        }
        inner.resets += 1;
    }

    fn navigate(&self, uri: &str) -> bool {
        let mut inner = self.lock();
        inner.navigations.push(uri.to_owned());
        inner.navigation_allowed
    }

    fn copy_to_clipboard(&self, text: &str) -> bool {
        let mut inner = self.lock();
        if !inner.clipboard_available {
            return false;
        }
        inner.clipboard = Some(text.to_owned());
        true
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Confirmation {
        let mut inner = self.lock();
        inner.prompts.push(prompt.clone());
        inner.confirmation
    }
}
