use thiserror::Error;

use crate::type_descriptor::TypeDescriptor;

/// Errors returned by converters and the conversion service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No registered converter handles the pair.
    #[error("unsupported type: cannot convert from '{from}' to '{to}'")]
    Unsupported { from: TypeDescriptor, to: TypeDescriptor },

    #[error("cannot convert '{value}' to '{target}': {reason}")]
    MalformedInput {
        value: String,
        target: TypeDescriptor,
        reason: String,
    },

    /// The value's payload does not match the descriptor it was declared with.
    #[error("value of kind '{actual}' does not match declared type '{declared}'")]
    ValueMismatch {
        declared: TypeDescriptor,
        actual: &'static str,
    },

    /// A converter panicked; the panic was caught at the converter boundary.
    #[error("converter failed internally: {0}")]
    Internal(String),
}

impl ConversionError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ConversionError::Unsupported { .. })
    }
}
