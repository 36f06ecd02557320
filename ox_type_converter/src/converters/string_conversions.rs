//! Converters whose source type is a string.

use crate::converters::{expect_text, guarded, unsupported, TypeConverter};
use crate::error::ConversionError;
use crate::type_descriptor::{NumberKind, TypeDescriptor};
use crate::value::Value;

/// Parses text into a complex number.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToNumberConverter;

impl StringToNumberConverter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeConverter for StringToNumberConverter {
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        source.is_string() && target.number_kind() == Some(NumberKind::Complex)
    }

    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let Some(kind) = target.number_kind().filter(|_| self.supports(source, target)) else {
            return Err(unsupported(source, target));
        };
        let text = expect_text(value, source)?;
        source.to_number(text, kind).map(Value::Number)
    }
}

/// Parses a boolean literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToBooleanConverter;

impl StringToBooleanConverter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeConverter for StringToBooleanConverter {
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        source.is_string() && target.is_boolean()
    }

    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        if !self.supports(source, target) {
            return Err(unsupported(source, target));
        }
        let text = expect_text(value, source)?;
        guarded(|| target.to_boolean(text)).map(Value::Boolean)
    }
}
