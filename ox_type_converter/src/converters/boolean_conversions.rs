//! Converters whose source type is a boolean.

use crate::converters::{expect_bool, unsupported, TypeConverter};
use crate::error::ConversionError;
use crate::type_descriptor::TypeDescriptor;
use crate::value::Value;

/// Formats a boolean as `"true"` or `"false"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanToStringConverter;

impl BooleanToStringConverter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeConverter for BooleanToStringConverter {
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        target.is_string() && source.is_boolean()
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
        let flag = expect_bool(value, source)?;
        target.format_boolean(flag).map(Value::String)
    }
}
