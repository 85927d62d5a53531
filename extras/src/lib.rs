//! Bevy Remote Protocol access to `export_forge` property registries
//!
//! Attach a [`ForgedProperties`] component to any entity, declare properties on
//! its registry, and add [`ExportForgePlugin`]. Remote tools can then list, read
//! and write those properties over BRP.
//!
//! # Usage
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_export_forge::{ExportForgePlugin, ForgedProperties};
//!
//! fn spawn_player(mut commands: Commands) {
//!     let mut forged = ForgedProperties::new();
//!     if let Ok(mut title) = forged.registry_mut().create::<String>("title") {
//!         title.on_get(|| "Player".to_string()).placeholder("Name");
//!     }
//!     commands.spawn(forged);
//! }
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(ExportForgePlugin::default())
//!     .add_systems(Startup, spawn_player)
//!     .run();
//! ```
//!
//! # Available BRP Methods
//!
//! ### `export_forge/list_properties`
//! Returns the records of every currently visible property, in registration order.
//! - `entity` (u64, required): entity carrying `ForgedProperties`
//!
//! Each record is `{"name", "type", "hint", "hint_string", "usage"}` with the
//! Godot 4 integer codes.
//!
//! ### `export_forge/get_property`
//! Reads one property. Unknown or write-only properties return `null`.
//! - `entity` (u64, required)
//! - `name` (string, required)
//!
//! ### `export_forge/set_property`
//! Writes one property and reports whether a setter handled it.
//! - `entity` (u64, required)
//! - `name` (string, required)
//! - `value` (required): tagged variant such as `{"Float": 2.5}`; plain JSON
//!   numbers, strings, booleans, arrays and objects are accepted as well
//!
//! Successful writes that notify produce a [`PropertyListChanged`] message
//! during the next `Update`.

mod component;
mod handlers;
mod plugin;
mod systems;

pub use component::ForgedProperties;
pub use plugin::{ExportForgePlugin, ForgeRuntime};
pub use systems::PropertyListChanged;

/// Default port for remote control connections
///
/// This matches Bevy's `RemoteHttpPlugin` default port to ensure compatibility.
pub const DEFAULT_REMOTE_PORT: u16 = 15702;

/// Environment variable overriding the BRP port
pub const PORT_ENV_VAR: &str = "EXPORT_FORGE_PORT";
