use std::collections::HashMap;

use log::trace;
use ox_type_converter::{ConversionError, TypeConverterService, TypeDescriptor, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{0}' has no value")]
    Unset(String),
    #[error("field '{field}': {source}")]
    Conversion {
        field: String,
        #[source]
        source: ConversionError,
    },
}

/// A declared field: its type and, once assigned, its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub value_type: TypeDescriptor,
    pub value: Option<Value>,
}

/// A set of named, typed fields filled from externally-sourced values.
///
/// Values whose type differs from the field's declared type are coerced
/// through a `TypeConverterService` on assignment.
#[derive(Debug, Clone, Default)]
pub struct TypedRecord {
    fields: HashMap<String, Field>,
}

impl TypedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Returns the previous declaration if the name was taken.
    pub fn declare(&mut self, name: &str, value_type: TypeDescriptor) -> Option<Field> {
        self.fields.insert(
            name.to_string(),
            Field {
                value_type,
                value: None,
            },
        )
    }

    /// Assign `value`, declared as `value_type`, to the field `name`.
    ///
    /// The stored value always has the field's declared type: a payload that
    /// does not match it, whether passed through or returned by a converter,
    /// is rejected with `ConversionError::ValueMismatch`. Any numeric payload
    /// satisfies a number field. On error the field keeps its previous value.
    pub fn assign(
        &mut self,
        name: &str,
        value: Value,
        value_type: &TypeDescriptor,
        service: &dyn TypeConverterService,
    ) -> Result<(), RecordError> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;

        let value = if *value_type == field.value_type {
            value
        } else {
            trace!("Coercing field '{}' from '{}' to '{}'", name, value_type, field.value_type);
            service
                .convert(&value, value_type, &field.value_type)
                .map_err(|source| RecordError::Conversion {
                    field: name.to_string(),
                    source,
                })?
        };

        if !conforms(&value, &field.value_type) {
            return Err(RecordError::Conversion {
                field: name.to_string(),
                source: ConversionError::ValueMismatch {
                    declared: field.value_type.clone(),
                    actual: value.kind_name(),
                },
            });
        }

        field.value = Some(value);
        Ok(())
    }

    /// Read the field `name` converted to `target`.
    pub fn get_as(
        &self,
        name: &str,
        target: &TypeDescriptor,
        service: &dyn TypeConverterService,
    ) -> Result<Value, RecordError> {
        let field = self
            .fields
            .get(name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        let value = field
            .value
            .as_ref()
            .ok_or_else(|| RecordError::Unset(name.to_string()))?;

        if *target == field.value_type {
            return Ok(value.clone());
        }
        service
            .convert(value, &field.value_type, target)
            .map_err(|source| RecordError::Conversion {
                field: name.to_string(),
                source,
            })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)?.value.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop all assigned values, keeping the declarations.
    pub fn clear_values(&mut self) {
        for field in self.fields.values_mut() {
            field.value = None;
        }
    }
}

// Custom descriptors have no payload shape of their own, so anything goes.
fn conforms(value: &Value, declared: &TypeDescriptor) -> bool {
    match (value, declared) {
        (_, TypeDescriptor::Custom(_)) => true,
        (Value::String(_), TypeDescriptor::String) => true,
        (Value::Number(_), TypeDescriptor::Number(_)) => true,
        (Value::Boolean(_), TypeDescriptor::Boolean) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ox_type_converter::{Complex, ConversionService, FnConverter, NumberKind};

    fn record() -> TypedRecord {
        let mut record = TypedRecord::new();
        record.declare("ratio", TypeDescriptor::Number(NumberKind::Complex));
        record.declare("enabled", TypeDescriptor::Boolean);
        record.declare("label", TypeDescriptor::String);
        record
    }

    #[test]
    fn test_new_record() {
        let record = record();
        assert_eq!(record.len(), 3);
        assert!(record.has_field("enabled"));
        assert_eq!(record.field_names(), vec!["enabled", "label", "ratio"]);
        assert!(record.get("enabled").is_none());
        assert!(TypedRecord::new().is_empty());
    }

    #[test]
    fn test_assign_coerces_strings() {
        let service = ConversionService::new();
        let mut record = record();

        let string = TypeDescriptor::String;
        record.assign("ratio", Value::from("0.5"), &string, &service).unwrap();
        record.assign("enabled", Value::from("yes"), &string, &service).unwrap();

        assert_eq!(record.get("ratio"), Some(&Value::from(Complex::new(0.5, 0.0))));
        assert_eq!(record.get("enabled"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_assign_same_type_skips_conversion() {
        let service = ConversionService::empty();
        let mut record = record();
        let string = TypeDescriptor::String;
        record.assign("label", Value::from("hello"), &string, &service).unwrap();
        assert_eq!(record.get("label"), Some(&Value::from("hello")));
    }

    #[test]
    fn test_assign_failure_keeps_previous_value() {
        let service = ConversionService::new();
        let mut record = record();
        let string = TypeDescriptor::String;
        record.assign("enabled", Value::from("on"), &string, &service).unwrap();

        let result = record.assign("enabled", Value::from("perhaps"), &string, &service);
        match result {
            Err(RecordError::Conversion { field, source }) => {
                assert_eq!(field, "enabled");
                assert!(matches!(source, ConversionError::MalformedInput { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(record.get("enabled"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_assign_unknown_field() {
        let service = ConversionService::new();
        let mut record = record();
        let result = record.assign("missing", Value::from("1"), &TypeDescriptor::String, &service);
        assert_eq!(result, Err(RecordError::UnknownField("missing".to_string())));
    }

    #[test]
    fn test_assign_unsupported_pair() {
        let service = ConversionService::new();
        let mut record = record();
        let result = record.assign("ratio", Value::from(true), &TypeDescriptor::Boolean, &service);
        assert!(matches!(
            result,
            Err(RecordError::Conversion {
                source: ConversionError::Unsupported { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_assign_rejects_payload_of_wrong_type() {
        let service = ConversionService::new();
        let mut record = record();
        record.assign("enabled", Value::from(true), &TypeDescriptor::Boolean, &service).unwrap();

        // Declared as boolean but carrying text.
        let result = record.assign(
            "enabled",
            Value::from("not-a-bool"),
            &TypeDescriptor::Boolean,
            &service,
        );
        assert_eq!(
            result,
            Err(RecordError::Conversion {
                field: "enabled".to_string(),
                source: ConversionError::ValueMismatch {
                    declared: TypeDescriptor::Boolean,
                    actual: "string",
                },
            })
        );
        assert_eq!(record.get("enabled"), Some(&Value::Boolean(true)));

        // Any numeric payload fits a number field.
        let complex = TypeDescriptor::Number(NumberKind::Complex);
        record.assign("ratio", Value::from(2.5_f64), &complex, &service).unwrap();
        assert_eq!(record.get("ratio"), Some(&Value::from(2.5_f64)));
    }

    #[test]
    fn test_assign_rejects_converter_output_of_wrong_type() {
        let service = ConversionService::new();
        service.register(
            "string-to-boolean-as-text",
            FnConverter::new(
                |source, target| source.is_string() && target.is_boolean(),
                |value, _source, _target| Ok(value.clone()),
            ),
        );
        let mut record = record();

        let string = TypeDescriptor::String;
        let result = record.assign("enabled", Value::from("yes"), &string, &service);
        assert!(matches!(
            result,
            Err(RecordError::Conversion {
                source: ConversionError::ValueMismatch {
                    declared: TypeDescriptor::Boolean,
                    actual: "string",
                },
                ..
            })
        ));
        assert!(record.get("enabled").is_none());
    }

    #[test]
    fn test_get_as_string() {
        let service = ConversionService::new();
        let mut record = record();
        let string = TypeDescriptor::String;
        record.assign("ratio", Value::from("3+4i"), &string, &service).unwrap();
        record.assign("enabled", Value::from("0"), &string, &service).unwrap();

        assert_eq!(record.get_as("ratio", &string, &service), Ok(Value::from("3+4i")));
        assert_eq!(record.get_as("enabled", &string, &service), Ok(Value::from("false")));
        assert_eq!(
            record.get_as("label", &string, &service),
            Err(RecordError::Unset("label".to_string()))
        );
    }

    #[test]
    fn test_clear_values() {
        let service = ConversionService::new();
        let mut record = record();
        record.assign("label", Value::from("x"), &TypeDescriptor::String, &service).unwrap();
        record.clear_values();
        assert!(record.get("label").is_none());
        assert_eq!(record.len(), 3);
    }
}
