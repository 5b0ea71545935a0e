//! Error types for surface operations.

/// Errors raised by surface helpers.
///
/// Surface writes themselves never fail; these cover parsing identifiers
/// and the I/O of front ends that talk to a real terminal or launcher.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// A control name that is not part of the lead form.
    #[error("unknown form control: {name}")]
    UnknownField { name: String },

    /// A confirmation answer that could not be understood.
    #[error("unrecognised confirmation answer: {answer}")]
    UnknownAnswer { answer: String },

    /// Reading from or writing to the front end failed.
    #[error("surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}
