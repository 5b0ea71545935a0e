//! The lead record and field collection.
//!
//! A [`LeadRecord`] is built fresh from the surface on every submit attempt
//! and dropped once the attempt is reported. Nothing here persists.

use serde::{Deserialize, Serialize};

use gridlead_surface::{FieldId, FormSurface};

/// Timeline choices offered next to the form. Presentation only; any string
/// is accepted.
pub const TIMELINE_OPTIONS: [&str; 4] = [
    "Immediately",
    "Within 1–3 months",
    "Within 3–6 months",
    "Just exploring",
];

/// One early-access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    pub org: String,
    pub usecase: String,
    pub timeline: String,
    pub consent: bool,
}

impl LeadRecord {
    /// Trimmed text of a string field. `consent` has no text and yields `""`.
    #[must_use]
    pub fn text(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Role => &self.role,
            FieldId::Org => &self.org,
            FieldId::Usecase => &self.usecase,
            FieldId::Timeline => &self.timeline,
            FieldId::Consent => "",
        }
    }
}

/// Read the current control values into a [`LeadRecord`].
///
/// Text is trimmed, absent controls read as empty, and an absent consent box
/// reads as unchecked. Never fails.
pub fn collect<S: FormSurface + ?Sized>(surface: &S) -> LeadRecord {
    let text = |field| {
        surface
            .text_value(field)
            .map(|v| v.trim().to_owned())
            .unwrap_or_default()
    };

    LeadRecord {
        name: text(FieldId::Name),
        email: text(FieldId::Email),
        role: text(FieldId::Role),
        org: text(FieldId::Org),
        usecase: text(FieldId::Usecase),
        timeline: text(FieldId::Timeline),
        consent: surface.is_checked(FieldId::Consent).unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use gridlead_surface::MemorySurface;

    use super::*;

    #[test]
    fn collect_trims_every_text_field() {
        let surface = MemorySurface::new()
            .with_value(FieldId::Name, "  Ada Lovelace ")
            .with_value(FieldId::Email, "\tada@x.com\n")
            .with_value(FieldId::Usecase, " index search ")
            .with_value(FieldId::Timeline, " Immediately")
            .with_checked(FieldId::Consent, true);

        let record = collect(&surface);
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.email, "ada@x.com");
        assert_eq!(record.usecase, "index search");
        assert_eq!(record.timeline, "Immediately");
        assert_eq!(record.role, "");
        assert!(record.consent);
    }

    #[test]
    fn missing_controls_degrade_to_empty_and_false() {
        let surface = MemorySurface::new()
            .with_value(FieldId::Name, "Ada")
            .without_control(FieldId::Org)
            .without_control(FieldId::Consent);

        let record = collect(&surface);
        assert_eq!(record.name, "Ada");
        assert_eq!(record.org, "");
        assert!(!record.consent);
    }

    #[test]
    fn serializes_with_form_field_names() {
        let record = LeadRecord {
            name: "Ada".to_owned(),
            consent: true,
            ..LeadRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap_or_default();
        for key in ["name", "email", "role", "org", "usecase", "timeline", "consent"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["consent"], serde_json::Value::Bool(true));
    }

    #[test]
    fn text_accessor_matches_fields() {
        let record = LeadRecord {
            usecase: "maps".to_owned(),
            ..LeadRecord::default()
        };
        assert_eq!(record.text(FieldId::Usecase), "maps");
        assert_eq!(record.text(FieldId::Consent), "");
    }
}
