//! Identifiers and value types shared by every surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SurfaceError;

/// A named control of the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Email,
    Role,
    Org,
    Usecase,
    Timeline,
    Consent,
}

impl FieldId {
    /// Every control, in form order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Org,
        Self::Usecase,
        Self::Timeline,
        Self::Consent,
    ];

    /// Controls that carry validation rules and an error slot.
    pub const VALIDATED: [Self; 4] = [Self::Name, Self::Email, Self::Usecase, Self::Consent];

    /// The control's element id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Org => "org",
            Self::Usecase => "usecase",
            Self::Timeline => "timeline",
            Self::Consent => "consent",
        }
    }

    /// Element id of the inline error slot that describes this control.
    #[must_use]
    pub fn error_slot_id(self) -> String {
        format!("err-{}", self.as_str())
    }

    /// Whether the control is a checkbox rather than a text input.
    #[must_use]
    pub const fn is_checkbox(self) -> bool {
        matches!(self, Self::Consent)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SurfaceError::UnknownField { name: s.to_owned() })
    }
}

/// Visual kind of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Informational, no emphasis.
    Neutral,
    /// A delivery is in flight.
    Pending,
    Success,
    Error,
}

impl StatusKind {
    /// Class attribute the status element carries for this kind.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Neutral | Self::Pending => "form-message",
            Self::Success => "form-message status-success",
            Self::Error => "form-message status-error",
        }
    }
}

/// The single status line under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    #[must_use]
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// An empty neutral status, used to clear the line.
    #[must_use]
    pub fn cleared() -> Self {
        Self::new(StatusKind::Neutral, String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Content of the "did your email go out?" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Rendered message body, offered for copying.
    pub body: String,
    /// URI that re-opens the mail client.
    pub reopen_uri: String,
    /// Address to write to directly if nothing works.
    pub contact: String,
}

/// The user's answer to the confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    /// "I sent it".
    Sent,
    /// "I couldn't send it".
    CouldNotSend,
    /// Dialog closed without an answer.
    Dismissed,
}

impl FromStr for Confirmation {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sent" | "y" | "yes" => Ok(Self::Sent),
            "failed" | "n" | "no" => Ok(Self::CouldNotSend),
            "" | "skip" | "dismiss" => Ok(Self::Dismissed),
            other => Err(SurfaceError::UnknownAnswer {
                answer: other.to_owned(),
            }),
        }
    }
}
