//! ox_type_converter - Runtime conversion between dynamically-typed values
//!
//! Converters declare which (source, target) type pairs they support and a
//! thread-safe `ConversionService` picks one at runtime. String to complex
//! number, complex number to string and string/boolean converters are
//! registered out of the box.

pub mod config;
pub mod converters;
pub mod error;
pub mod registry;
pub mod type_descriptor;
pub mod value;

pub use config::{ConfigError, ServiceConfig};
pub use converters::{ConverterKey, FnConverter, TypeConverter};
pub use error::ConversionError;
pub use registry::{ConversionService, ConverterRegistry, TypeConverterService};
pub use type_descriptor::{NumberKind, TypeDescriptor};
pub use value::{Complex, Number, Value};
