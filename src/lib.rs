pub mod typed_record;

pub use ox_type_converter::{
    ConversionError, ConversionService, ConverterKey, ConverterRegistry, NumberKind,
    ServiceConfig, TypeConverter, TypeConverterService, TypeDescriptor, Value,
};
pub use typed_record::{Field, RecordError, TypedRecord};
