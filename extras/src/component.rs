//! Component that carries a property registry

use bevy::prelude::*;
use export_forge::{ForgeConfig, PropertyRegistry};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Dynamic inspector properties of one entity
///
/// The registry's notifier queues changed property names on the component;
/// the plugin drains them each frame into [`PropertyListChanged`](crate::PropertyListChanged)
/// messages.
#[derive(Component, Debug)]
pub struct ForgedProperties {
    registry: PropertyRegistry,
    changes:  UnboundedReceiver<String>,
}

impl Default for ForgedProperties {
    fn default() -> Self { Self::new() }
}

impl ForgedProperties {
    /// Empty registry with the default config
    ///
    /// `EXPORT_FORGE_DEBOUNCE_MS` still overrides the debounce delay.
    #[must_use]
    pub fn new() -> Self { Self::with_config(ForgeConfig::new()) }

    /// Empty registry with `config`
    #[must_use]
    pub fn with_config(config: ForgeConfig) -> Self {
        let (sender, changes) = mpsc::unbounded_channel::<String>();
        let registry = PropertyRegistry::with_config(
            move |property: &str| {
                if sender.send(property.to_string()).is_err() {
                    trace!("Property change queue closed");
                }
            },
            config,
        );
        Self { registry, changes }
    }

    /// The wrapped registry
    #[must_use]
    pub const fn registry(&self) -> &PropertyRegistry { &self.registry }

    /// The wrapped registry, for declaring or writing properties
    pub const fn registry_mut(&mut self) -> &mut PropertyRegistry { &mut self.registry }

    /// Flush due debounced notifications and take every queued change
    pub fn take_changes(&mut self) -> Vec<String> {
        self.registry.flush_deferred();
        let mut changed = Vec::new();
        while let Ok(property) = self.changes.try_recv() {
            changed.push(property);
        }
        changed
    }
}
