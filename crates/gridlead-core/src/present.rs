//! Inline error presentation.

use std::collections::BTreeMap;

use gridlead_surface::{FieldId, FormSurface};

/// Render `errors` into the per-field error slots.
///
/// Every validated field is reset first, so the result depends only on
/// `errors` and not on what was shown before: `present(&s, &empty)` always
/// leaves a clean form. Fields whose control is missing are skipped.
pub fn present<S: FormSurface + ?Sized>(surface: &S, errors: &BTreeMap<FieldId, &str>) {
    for field in FieldId::VALIDATED {
        if !surface.has_control(field) {
            continue;
        }
        match errors.get(&field) {
            Some(message) => surface.show_field_error(field, message),
            None => surface.clear_field_error(field),
        }
    }
}

/// Remove every inline error.
pub fn clear<S: FormSurface + ?Sized>(surface: &S) {
    present(surface, &BTreeMap::new());
}
