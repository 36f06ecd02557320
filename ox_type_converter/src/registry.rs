use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace};

use crate::config::ServiceConfig;
use crate::converters::{builtin_converters, ConverterKey, TypeConverter};
use crate::error::ConversionError;
use crate::type_descriptor::TypeDescriptor;
use crate::value::Value;

/// Accepts converter registrations.
pub trait ConverterRegistry {
    /// Register `converter` under `key`, replacing any converter already
    /// registered under the same key.
    ///
    /// # Panics
    /// Panics if `key` is empty.
    fn register_converter(&self, key: ConverterKey, converter: Arc<dyn TypeConverter>);
}

/// Resolves and performs conversions between type descriptors.
pub trait TypeConverterService: ConverterRegistry {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool;

    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError>;
}

struct Entry {
    key: ConverterKey,
    converter: Arc<dyn TypeConverter>,
}

/// Thread-safe converter registry with the built-in converters preinstalled.
///
/// When several converters support the same pair, the one registered most
/// recently wins. Re-registering a key moves it to the most recent position.
pub struct ConversionService {
    // Oldest registration first.
    entries: RwLock<Vec<Entry>>,
}

impl ConversionService {
    /// Create a service with all built-in converters registered.
    pub fn new() -> Self {
        Self::with_config(&ServiceConfig::default())
    }

    /// Create a service with no converters at all.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn with_config(config: &ServiceConfig) -> Self {
        let service = Self::empty();
        for (key, converter) in builtin_converters() {
            if config.builtin_enabled(&key) {
                service.register_converter(key, converter);
            }
        }
        service
    }

    pub fn register_converter(&self, key: ConverterKey, converter: Arc<dyn TypeConverter>) {
        assert!(!key.as_str().is_empty(), "converter key must not be empty");

        let mut entries = self.write();
        if let Some(pos) = entries.iter().position(|entry| entry.key == key) {
            debug!("Replacing converter '{}'", key);
            entries.remove(pos);
        } else {
            debug!("Registering converter '{}'", key);
        }
        entries.push(Entry { key, converter });
    }

    /// Convenience wrapper around `register_converter` for concrete converters.
    pub fn register<C: TypeConverter + 'static>(&self, key: impl Into<ConverterKey>, converter: C) {
        self.register_converter(key.into(), Arc::new(converter));
    }

    pub fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.read()
            .iter()
            .rev()
            .any(|entry| entry.converter.supports(source, target))
    }

    /// Key of the converter that would handle `source` -> `target`.
    pub fn resolve(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Option<ConverterKey> {
        self.find(source, target).map(|(key, _)| key)
    }

    pub fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        // The lock is released before delegating.
        let Some((key, converter)) = self.find(source, target) else {
            trace!("No converter from '{}' to '{}'", source, target);
            return Err(ConversionError::Unsupported {
                from: source.clone(),
                to: target.clone(),
            });
        };
        trace!("Converting '{}' to '{}' with '{}'", source, target, key);
        converter.convert(value, source, target)
    }

    pub fn has_converter(&self, key: &ConverterKey) -> bool {
        self.read().iter().any(|entry| &entry.key == key)
    }

    /// Registered keys, highest precedence first.
    pub fn converter_keys(&self) -> Vec<ConverterKey> {
        self.read().iter().rev().map(|entry| entry.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn find(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Option<(ConverterKey, Arc<dyn TypeConverter>)> {
        self.read()
            .iter()
            .rev()
            .find(|entry| entry.converter.supports(source, target))
            .map(|entry| (entry.key.clone(), Arc::clone(&entry.converter)))
    }

    // Entries are only ever inserted or removed whole, so a poisoned lock
    // still guards a consistent table.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionService")
            .field("converters", &self.converter_keys())
            .finish()
    }
}

impl ConverterRegistry for ConversionService {
    fn register_converter(&self, key: ConverterKey, converter: Arc<dyn TypeConverter>) {
        ConversionService::register_converter(self, key, converter)
    }
}

impl TypeConverterService for ConversionService {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        ConversionService::can_convert(self, source, target)
    }

    fn convert(
        &self,
        value: &Value,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        ConversionService::convert(self, value, source, target)
    }
}
