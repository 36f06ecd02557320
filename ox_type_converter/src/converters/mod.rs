//! Converter trait, converter keys and the built-in converters
//!
//! Each built-in converter lives in the module named after its source type.

pub mod boolean_conversions;
pub mod numeric_conversions;
pub mod string_conversions;

pub use boolean_conversions::BooleanToStringConverter;
pub use numeric_conversions::NumberToStringConverter;
pub use string_conversions::{StringToBooleanConverter, StringToNumberConverter};

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::ConversionError;
use crate::type_descriptor::TypeDescriptor;
use crate::value::{Number, Value};

/// A stateless policy converting values between two type descriptors.
pub trait TypeConverter: Send + Sync {
    /// Whether this converter handles `source` -> `target`. Never fails.
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool;

    /// Convert `value`, declared as `source`, into `target`.
    ///
    /// Returns `ConversionError::Unsupported` for a pair `supports` rejects.
    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError>;
}

/// Stable name a converter is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConverterKey(Cow<'static, str>);

impl ConverterKey {
    pub fn new(name: impl Into<String>) -> Self {
        ConverterKey(Cow::Owned(name.into()))
    }

    pub const fn from_static(name: &'static str) -> Self {
        ConverterKey(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ConverterKey {
    fn from(s: &'static str) -> Self {
        ConverterKey::from_static(s)
    }
}

impl From<String> for ConverterKey {
    fn from(s: String) -> Self {
        ConverterKey::new(s)
    }
}

impl fmt::Display for ConverterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const STRING_TO_NUMBER: ConverterKey = ConverterKey::from_static("string-to-number");
pub const NUMBER_TO_STRING: ConverterKey = ConverterKey::from_static("number-to-string");
pub const STRING_TO_BOOLEAN: ConverterKey = ConverterKey::from_static("string-to-boolean");
pub const BOOLEAN_TO_STRING: ConverterKey = ConverterKey::from_static("boolean-to-string");

/// The built-in converters in registration order.
pub fn builtin_converters() -> Vec<(ConverterKey, Arc<dyn TypeConverter>)> {
    vec![
        (NUMBER_TO_STRING, Arc::new(NumberToStringConverter::new()) as Arc<dyn TypeConverter>),
        (STRING_TO_NUMBER, Arc::new(StringToNumberConverter::new()) as Arc<dyn TypeConverter>),
        (BOOLEAN_TO_STRING, Arc::new(BooleanToStringConverter::new()) as Arc<dyn TypeConverter>),
        (STRING_TO_BOOLEAN, Arc::new(StringToBooleanConverter::new()) as Arc<dyn TypeConverter>),
    ]
}

/// Adapts a pair of closures into a `TypeConverter`.
pub struct FnConverter<S, C> {
    supports: S,
    convert: C,
}

impl<S, C> FnConverter<S, C>
where
    S: Fn(&TypeDescriptor, &TypeDescriptor) -> bool + Send + Sync,
    C: Fn(&Value, &TypeDescriptor, &TypeDescriptor) -> Result<Value, ConversionError> + Send + Sync,
{
    pub fn new(supports: S, convert: C) -> Self {
        Self { supports, convert }
    }
}

impl<S, C> TypeConverter for FnConverter<S, C>
where
    S: Fn(&TypeDescriptor, &TypeDescriptor) -> bool + Send + Sync,
    C: Fn(&Value, &TypeDescriptor, &TypeDescriptor) -> Result<Value, ConversionError> + Send + Sync,
{
    fn supports(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        (self.supports)(source, target)
    }

    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        if !(self.supports)(source, target) {
            return Err(unsupported(source, target));
        }
        (self.convert)(value, source, target)
    }
}

pub(crate) fn unsupported(source: &TypeDescriptor, target: &TypeDescriptor) -> ConversionError {
    ConversionError::Unsupported {
        from: source.clone(),
        to: target.clone(),
    }
}

pub(crate) fn expect_text<'a>(
    value: &'a Value,
    declared: &TypeDescriptor,
) -> Result<&'a str, ConversionError> {
    value.as_str().ok_or_else(|| mismatch(value, declared))
}

pub(crate) fn expect_number<'a>(
    value: &'a Value,
    declared: &TypeDescriptor,
) -> Result<&'a Number, ConversionError> {
    value.as_number().ok_or_else(|| mismatch(value, declared))
}

pub(crate) fn expect_bool(
    value: &Value,
    declared: &TypeDescriptor,
) -> Result<bool, ConversionError> {
    value.as_bool().ok_or_else(|| mismatch(value, declared))
}

fn mismatch(value: &Value, declared: &TypeDescriptor) -> ConversionError {
    ConversionError::ValueMismatch {
        declared: declared.clone(),
        actual: value.kind_name(),
    }
}

/// Runs `f`, turning a panic into `ConversionError::Internal`.
pub(crate) fn guarded<T>(
    f: impl FnOnce() -> Result<T, ConversionError>,
) -> Result<T, ConversionError> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(ConversionError::Internal(panic_message(payload.as_ref())))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
