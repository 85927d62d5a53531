//! Plugin implementation for forged property methods

use std::io;

use bevy::prelude::*;
use bevy::remote::RemotePlugin;
use bevy::remote::http::RemoteHttpPlugin;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::handlers;
use crate::systems::{self, PropertyListChanged};
use crate::{DEFAULT_REMOTE_PORT, PORT_ENV_VAR};

/// Command prefix for `export_forge` methods
const EXPORT_FORGE_COMMAND_PREFIX: &str = "export_forge/";

/// Plugin that exposes [`ForgedProperties`](crate::ForgedProperties) over BRP
///
/// Provides:
/// - `export_forge/list_properties`: Records of an entity's visible properties
/// - `export_forge/get_property`: Read one property
/// - `export_forge/set_property`: Write one property
#[allow(non_upper_case_globals, reason = "usable as a unit-like plugin value")]
pub const ExportForgePlugin: ExportForgePlugin = ExportForgePlugin::new();

/// Plugin type for serving forged properties
pub struct ExportForgePlugin {
    port: Option<u16>,
}

impl Default for ExportForgePlugin {
    fn default() -> Self { Self::new() }
}

impl ExportForgePlugin {
    /// Create a new plugin instance with default port
    #[must_use]
    pub const fn new() -> Self { Self { port: None } }

    /// Create plugin with custom port
    #[must_use]
    pub const fn with_port(port: u16) -> Self { Self { port: Some(port) } }

    /// Get the effective port, checking environment variable first
    ///
    /// Priority order:
    /// 1. `EXPORT_FORGE_PORT` environment variable (highest priority)
    /// 2. Explicitly set port via `with_port()`
    /// 3. Default port (15702)
    #[must_use]
    pub fn get_effective_port(&self) -> (u16, String) {
        let env_port = std::env::var(PORT_ENV_VAR)
            .ok()
            .and_then(|s| s.parse::<u16>().ok());

        let final_port = env_port.unwrap_or_else(|| self.port.unwrap_or(DEFAULT_REMOTE_PORT));

        let source_description = match (env_port, self.port) {
            (Some(_), Some(with_port_value)) => {
                format!("environment override from with_port {with_port_value}")
            },
            (Some(_), None) => {
                format!("environment override from default {DEFAULT_REMOTE_PORT}")
            },
            (None, Some(_)) => "with_port".to_string(),
            (None, None) => "default".to_string(),
        };

        (final_port, source_description)
    }
}

/// Tokio runtime driving debounce timers of every forged registry
#[derive(Resource, Debug)]
pub struct ForgeRuntime(Runtime);

impl ForgeRuntime {
    /// Start a single-worker runtime with the time driver enabled
    ///
    /// # Errors
    /// Returns the I/O error if the runtime cannot be started.
    pub fn new() -> io::Result<Self> {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("export-forge-timer")
            .enable_time()
            .build()
            .map(Self)
    }

    /// Handle used to spawn timers
    #[must_use]
    pub fn handle(&self) -> &Handle { self.0.handle() }
}

impl Plugin for ExportForgePlugin {
    fn build(&self, app: &mut App) {
        let (effective_port, source_description) = self.get_effective_port();

        let remote_plugin = RemotePlugin::default()
            .with_method(
                format!("{EXPORT_FORGE_COMMAND_PREFIX}get_property"),
                handlers::get_property_handler,
            )
            .with_method(
                format!("{EXPORT_FORGE_COMMAND_PREFIX}list_properties"),
                handlers::list_properties_handler,
            )
            .with_method(
                format!("{EXPORT_FORGE_COMMAND_PREFIX}set_property"),
                handlers::set_property_handler,
            );

        let http_plugin = RemoteHttpPlugin::default().with_port(effective_port);

        app.add_plugins((remote_plugin, http_plugin));
        app.add_message::<PropertyListChanged>();

        // Without a runtime, debounced writes fall back to immediate notification
        match ForgeRuntime::new() {
            Ok(runtime) => {
                app.insert_resource(runtime);
            },
            Err(e) => warn!("Failed to start export_forge timer runtime: {e}"),
        }

        app.add_systems(PreUpdate, systems::attach_runtime);
        app.add_systems(Update, systems::flush_property_changes);

        app.add_systems(Startup, move |_world: &mut World| {
            log_initialization(effective_port, &source_description);
        });
    }
}

fn log_initialization(port: u16, source_description: &str) {
    info!("export_forge BRP methods enabled on http://localhost:{port} ({source_description})");
}
