use thiserror::Error;

/// Errors raised while capturing a request or computing its JA4H fingerprint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuginnNetJa4hError {
    /// A request field cannot be encoded into the fingerprint.
    ///
    /// Raised for methods shorter than the two characters segment A needs.
    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: String, value: String },

    /// Raw request bytes could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}
