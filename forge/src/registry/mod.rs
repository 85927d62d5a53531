//! Ordered name → property map and the host-facing dispatch
//!
//! The registry owns the deferred-notification queue. Debounce timers only
//! push property names onto it; [`PropertyRegistry::flush_deferred`] drains it
//! on the owner thread and calls the [`ChangeNotifier`].

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use crate::builder::PropertyBuilder;
use crate::config::ForgeConfig;
use crate::error::{Error, Result};
use crate::hint::PropertyInfo;
use crate::host::{ChangeNotifier, PropertyHost};
use crate::property::{ExportProperty, NotifyContext};
use crate::variant::{ExportValue, ValueKind, Variant};

/// Dynamic properties of one owning object
pub struct PropertyRegistry {
    properties:  Vec<ExportProperty>,
    index:       HashMap<String, usize>,
    notifier:    Arc<dyn ChangeNotifier>,
    config:      ForgeConfig,
    deferred_tx: UnboundedSender<String>,
    deferred_rx: UnboundedReceiver<String>,
}

impl PropertyRegistry {
    /// Empty registry with the default config
    #[must_use]
    pub fn new(notifier: impl ChangeNotifier) -> Self {
        Self::with_config(notifier, ForgeConfig::default())
    }

    /// Empty registry with `config`
    #[must_use]
    pub fn with_config(notifier: impl ChangeNotifier, config: ForgeConfig) -> Self {
        let (deferred_tx, deferred_rx) = mpsc::unbounded_channel();
        Self {
            properties: Vec::new(),
            index: HashMap::new(),
            notifier: Arc::new(notifier),
            config,
            deferred_tx,
            deferred_rx,
        }
    }

    /// Registry config
    #[must_use]
    pub const fn config(&self) -> &ForgeConfig { &self.config }

    /// Run debounce timers on `runtime` from now on
    ///
    /// Properties that already started a debouncer keep their runtime.
    pub fn set_runtime(&mut self, runtime: Handle) {
        self.config = self.config.clone().with_runtime(runtime);
    }

    /// Register a property named `name` holding a `T`
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if `name` is already registered
    /// - [`Error::UnsupportedValueKind`] if `T` cannot back a property
    ///
    /// Nothing is registered on error.
    pub fn create<T: ExportValue>(&mut self, name: impl Into<String>) -> Result<PropertyBuilder<'_, T>> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::duplicate_name(name));
        }
        let kind = ValueKind::of::<T>()?;

        debug!("Registering property '{name}' as {}", kind.variant_type());
        let slot = self.properties.len();
        self.index.insert(name.clone(), slot);
        self.properties
            .push(ExportProperty::new(name, kind, TypeId::of::<T>()));

        let notify = self.config.default_notify_policy();
        let property = &mut self.properties[slot];
        Ok(PropertyBuilder::new(property, notify))
    }

    /// Re-open the builder of a registered `T` property
    ///
    /// Returns `None` if `name` is unknown or was registered with another type.
    pub fn property_mut<T: ExportValue>(&mut self, name: &str) -> Option<PropertyBuilder<'_, T>> {
        let notify = self.config.default_notify_policy();
        let slot = *self.index.get(name)?;
        let property = self.properties.get_mut(slot)?;
        (property.value_type() == TypeId::of::<T>()).then(|| PropertyBuilder::new(property, notify))
    }

    /// Registered property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ExportProperty> {
        self.index
            .get(name)
            .and_then(|&slot| self.properties.get(slot))
    }

    /// Records for every currently visible property, in registration order
    #[must_use]
    pub fn list_all(&self) -> Vec<PropertyInfo> {
        let records: Vec<PropertyInfo> = self
            .properties
            .iter()
            .filter_map(ExportProperty::build_record)
            .collect();
        debug!(
            "Listed {} of {} properties",
            records.len(),
            self.properties.len()
        );
        records
    }

    /// Current value of `name`; `Variant::Nil` if unknown or write-only
    #[must_use]
    pub fn read(&self, name: &str) -> Variant {
        let Some(property) = self.property(name) else {
            trace!("Read of unknown property '{name}'");
            return Variant::Nil;
        };
        trace!("Reading property '{name}'");
        property.get_value()
    }

    /// Write `value` to `name`, returning whether the setter ran
    ///
    /// `false` if `name` is unknown, the property has no setter, or `value`
    /// cannot be converted to the property type.
    pub fn write(&mut self, name: &str, value: &Variant) -> bool {
        let Some(&slot) = self.index.get(name) else {
            trace!("Write to unknown property '{name}'");
            return false;
        };
        trace!("Writing property '{name}'");

        let context = NotifyContext {
            notifier: self.notifier.as_ref(),
            deferred: &self.deferred_tx,
            runtime:  self.config.runtime(),
        };
        self.properties
            .get_mut(slot)
            .is_some_and(|property| property.set_value(value, &context))
    }

    /// Dispatch notifications whose debounce period has ended
    ///
    /// Call from the owner thread. Returns the number of notifications sent.
    pub fn flush_deferred(&mut self) -> usize {
        let mut dispatched = 0;
        while let Ok(name) = self.deferred_rx.try_recv() {
            trace!("Dispatching deferred notify for '{name}'");
            self.notifier.property_list_changed(&name);
            dispatched += 1;
        }
        dispatched
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    /// Number of registered properties, visible or not
    #[must_use]
    pub const fn len(&self) -> usize { self.properties.len() }

    /// Whether nothing is registered
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.properties.is_empty() }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(ExportProperty::name)
    }
}

impl PropertyHost for PropertyRegistry {
    fn property_list(&self) -> Vec<PropertyInfo> { self.list_all() }

    fn get_property(&self, name: &str) -> Variant { self.read(name) }

    fn set_property(&mut self, name: &str, value: Variant) -> bool { self.write(name, &value) }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("properties", &self.properties)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
