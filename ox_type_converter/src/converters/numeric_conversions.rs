//! Converters whose source type is a number.

use crate::converters::{expect_number, unsupported, TypeConverter};
use crate::error::ConversionError;
use crate::type_descriptor::{NumberKind, TypeDescriptor};
use crate::value::Value;

/// Formats a complex number as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberToStringConverter;

impl NumberToStringConverter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeConverter for NumberToStringConverter {
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        target.is_string() && source.number_kind() == Some(NumberKind::Complex)
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
        let number = expect_number(value, source)?;
        target.format_number(number).map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Complex, Number};

    fn complex() -> TypeDescriptor {
        TypeDescriptor::Number(NumberKind::Complex)
    }

    #[test]
    fn test_number_to_string_support() {
        let converter = NumberToStringConverter::new();
        assert!(converter.supports(&complex(), &TypeDescriptor::String));
        let float = TypeDescriptor::Number(NumberKind::Float);
        assert!(!converter.supports(&float, &TypeDescriptor::String));
        assert!(!converter.supports(&complex(), &TypeDescriptor::Boolean));
        assert!(!converter.supports(&TypeDescriptor::String, &complex()));
    }

    #[test]
    fn test_number_to_string() {
        let converter = NumberToStringConverter::new();
        let string = TypeDescriptor::String;
        let result = converter.convert(&Value::from(Complex::new(42.0, 0.0)), &complex(), &string);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Value::from("42"));

        let result = converter.convert(&Value::from(Complex::new(1.5, 2.0)), &complex(), &string);
        assert_eq!(result.unwrap(), Value::from("1.5+2i"));
    }

    #[test]
    fn test_number_to_string_formats_raw_value() {
        // Whatever number payload arrives is formatted as-is.
        let converter = NumberToStringConverter::new();
        let value = Value::Number(Number::Integer(-7));
        let result = converter.convert(&value, &complex(), &TypeDescriptor::String);
        assert_eq!(result.unwrap(), Value::from("-7"));
    }

    #[test]
    fn test_number_to_string_rejects_other_pairs() {
        let converter = NumberToStringConverter::new();
        let value = Value::from(Complex::new(42.0, 0.0));
        let result = converter.convert(&value, &complex(), &TypeDescriptor::Boolean);
        assert!(result.unwrap_err().is_unsupported());

        let result = converter.convert(&Value::from("42"), &complex(), &TypeDescriptor::String);
        assert!(matches!(result, Err(ConversionError::ValueMismatch { .. })));
    }
}
