//! Rendering surface abstraction for `gridlead`.
//!
//! This crate defines the [`FormSurface`] trait — the page the lead form
//! lives on, reduced to the handful of things the pipeline touches: named
//! controls, per-field error slots, one status line, the submit control, a
//! confirmation dialog, the clipboard, and navigation. It knows nothing about
//! validation rules or delivery.
//!
//! Two kinds of implementation exist:
//!
//! - [`MemorySurface`] — in-memory, used by tests and as the state store of
//!   headless front ends
//! - front-end specific surfaces (the `gridlead` CLI ships a terminal one)
//!
//! Every method except [`FormSurface::confirm`] is synchronous, like the DOM
//! operations it stands in for. Missing elements are not errors: a surface
//! without a given control simply reports it absent and ignores writes.

mod error;
mod memory;
mod types;

pub use error::SurfaceError;
pub use memory::{MemorySurface, STATUS_HISTORY_LIMIT};
pub use types::{Confirmation, ConfirmationPrompt, FieldId, Status, StatusKind};

/// The page a lead form is rendered on.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait FormSurface: Send + Sync + 'static {
    /// Whether the lead form exists at all. Without it the pipeline is
    /// disabled.
    fn has_form(&self) -> bool;

    /// Whether the control for `field` is present.
    fn has_control(&self, field: FieldId) -> bool;

    /// Raw (untrimmed) text of a control, or `None` if it is absent.
    fn text_value(&self, field: FieldId) -> Option<String>;

    /// Checked state of a checkbox control, or `None` if it is absent.
    fn is_checked(&self, field: FieldId) -> Option<bool>;

    /// Show `message` in the field's error slot and mark the control
    /// invalid (`aria-invalid`, `aria-describedby` pointing at the slot).
    fn show_field_error(&self, field: FieldId, message: &str);

    /// Empty the field's error slot and drop both accessibility markers.
    fn clear_field_error(&self, field: FieldId);

    /// Replace the status line. Only one status is ever visible.
    fn set_status(&self, status: Status);

    /// Atomically disable the submit control and mark it busy.
    ///
    /// Returns `false` if it was already disabled, in which case nothing
    /// changes. This is the only guard against concurrent submissions.
    fn try_disable_submit(&self) -> bool;

    /// Re-enable the submit control and drop the busy marker.
    fn enable_submit(&self);

    /// Whether the submit control currently accepts clicks.
    fn submit_enabled(&self) -> bool;

    /// Reset every control to its initial (empty / unchecked) value.
    fn reset(&self);

    /// Ask the user agent to navigate to `uri`.
    ///
    /// Returns `false` when the navigation was refused (blocked launcher,
    /// no handler). `true` only means it was handed off.
    fn navigate(&self, uri: &str) -> bool;

    /// Put `text` on the clipboard. Returns `false` if no clipboard is
    /// available.
    fn copy_to_clipboard(&self, text: &str) -> bool;

    /// Open the confirmation dialog and wait for the user's answer.
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Confirmation;
}
