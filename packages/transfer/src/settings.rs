//! Plugin settings and the visitor that reads and writes them.

use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::manager::TransferManager;

/// Describes one string setting to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Stable key used when storing the value.
    pub id: &'static str,
    /// Text shown to the user.
    pub description: String,
    pub required: bool,
    /// Mask the value when displaying it.
    pub sensitive: bool,
    /// Store the value between runs.
    pub persisted: bool,
    /// Ask the user for the value interactively.
    pub prompted: bool,
}

/// Host side of settings handling.
///
/// Settings call [`PropertyVisitor::string_property`] once per field with the
/// current value. Returning `Some` hands a new value back, which the settings
/// apply immediately.
pub trait PropertyVisitor {
    fn string_property(
        &mut self,
        property: &PropertyDescriptor,
        current: Option<&str>,
    ) -> Option<String>;
}

/// Feeds values from a map into settings.
pub struct PropertyLoader<'a> {
    values: &'a BTreeMap<String, String>,
}

impl<'a> PropertyLoader<'a> {
    pub fn new(values: &'a BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl PropertyVisitor for PropertyLoader<'_> {
    fn string_property(
        &mut self,
        property: &PropertyDescriptor,
        _current: Option<&str>,
    ) -> Option<String> {
        self.values.get(property.id).cloned()
    }
}

/// Collects the persisted values of settings into a map.
#[derive(Debug, Default)]
pub struct PropertySaver {
    values: BTreeMap<String, String>,
}

impl PropertySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_values(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl PropertyVisitor for PropertySaver {
    fn string_property(
        &mut self,
        property: &PropertyDescriptor,
        current: Option<&str>,
    ) -> Option<String> {
        if property.persisted {
            if let Some(value) = current {
                self.values.insert(property.id.to_string(), value.to_string());
            }
        }
        None
    }
}

/// Connection settings for one backend.
pub trait TransferSettings {
    /// Backend identifier, e.g. `"hubic"`.
    fn settings_type(&self) -> &str;

    /// Walk every field. Applying a value returned by the visitor may fail,
    /// e.g. when it triggers a credentials exchange.
    fn visit_properties(&mut self, visitor: &mut dyn PropertyVisitor) -> Result<(), StorageError>;

    fn create_transfer_manager(&self) -> Result<Box<dyn TransferManager>, StorageError>;
}

/// Entry point a backend registers with the host.
pub trait TransferPlugin {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn create_empty_settings(&self) -> Box<dyn TransferSettings>;
}
