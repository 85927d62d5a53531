//! Headless app with `ExportForgePlugin` for poking forged properties over BRP
//!
//! ```text
//! curl -X POST http://localhost:15702 -d '{"jsonrpc":"2.0","id":1,
//!   "method":"export_forge/set_property",
//!   "params":{"entity":<id>,"name":"speed","value":{"Float":3.0}}}'
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_export_forge::{ExportForgePlugin, ForgedProperties, PropertyListChanged};
use export_forge::{Callable, Color as ForgeColor, RangeHint, Variant};
use strum_macros::VariantNames;

#[derive(VariantNames)]
#[allow(dead_code, reason = "variant names feed the enum hint")]
enum Mode {
    Idle,
    Patrol,
    Chase,
}

#[derive(Debug, Clone)]
struct Tunables {
    speed:    f32,
    label:    String,
    mode:     i32,
    advanced: bool,
    detail:   i32,
    tint:     ForgeColor,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            speed:    1.0,
            label:    "Rotator".to_string(),
            mode:     0,
            advanced: false,
            detail:   3,
            tint:     ForgeColor::WHITE,
        }
    }
}

/// Shared with the property closures
#[derive(Component, Clone, Default)]
struct Shared(Arc<Mutex<Tunables>>);

impl Shared {
    fn get<T>(&self, read: impl Fn(&Tunables) -> T) -> Option<T> { self.0.lock().ok().map(|t| read(&t)) }

    fn set(&self, write: impl FnOnce(&mut Tunables)) {
        if let Ok(mut tunables) = self.0.lock() {
            write(&mut tunables);
        }
    }
}

#[derive(Component)]
struct Heading(f32);

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 30.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(ExportForgePlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (advance_heading, log_changes))
        .run();
}

fn setup(mut commands: Commands) {
    let shared = Shared::default();
    let mut forged = ForgedProperties::new();
    let registry = forged.registry_mut();

    if let Ok(mut speed) = registry.create::<f32>("speed") {
        let (read, write) = (shared.clone(), shared.clone());
        speed
            .on_get(move || read.get(|t| t.speed).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.speed = value))
            .range(RangeHint::new(0.0, 10.0).step(0.5).suffix("rad/s"));
    }

    if let Ok(mut label) = registry.create::<String>("label") {
        let (read, write) = (shared.clone(), shared.clone());
        label
            .on_get(move || read.get(|t| t.label.clone()).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.label = value))
            .placeholder("Display name");
    }

    if let Ok(mut mode) = registry.create::<i32>("mode") {
        let (read, write) = (shared.clone(), shared.clone());
        mode.on_get(move || read.get(|t| t.mode).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.mode = value))
            .enum_of::<Mode>();
    }

    if let Ok(mut advanced) = registry.create::<bool>("advanced") {
        let (read, write) = (shared.clone(), shared.clone());
        advanced
            .on_get(move || read.get(|t| t.advanced).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.advanced = value));
    }

    if let Ok(mut detail) = registry.create::<i32>("detail") {
        let (read, write, shown) = (shared.clone(), shared.clone(), shared.clone());
        detail
            .on_get(move || read.get(|t| t.detail).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.detail = value))
            .when(move || shown.get(|t| t.advanced).unwrap_or_default())
            .range(RangeHint::new(1.0, 8.0).step(1.0));
    }

    if let Ok(mut tint) = registry.create::<ForgeColor>("tint") {
        let (read, write) = (shared.clone(), shared.clone());
        tint.on_get(move || read.get(|t| t.tint).unwrap_or_default())
            .on_set(move |value| write.set(|t| t.tint = value))
            .no_alpha();
    }

    if let Ok(mut reset) = registry.create::<Callable>("reset") {
        let target = shared.clone();
        reset
            .on_get(move || {
                let target = target.clone();
                Callable::new("reset", move |_| {
                    target.set(|t| *t = Tunables::default());
                    Variant::Nil
                })
            })
            .tool_button("Reset", Some("Reload"));
    }

    let entity = commands.spawn((forged, shared, Heading(0.0))).id();
    info!("Forged properties on entity {}", entity.to_bits());
}

fn advance_heading(time: Res<Time>, mut query: Query<(&Shared, &mut Heading)>) {
    for (shared, mut heading) in &mut query {
        let speed = shared.get(|t| t.speed).unwrap_or_default();
        heading.0 = (heading.0 + speed * time.delta_secs()) % std::f32::consts::TAU;
    }
}

fn log_changes(mut changes: MessageReader<PropertyListChanged>, query: Query<&Shared>) {
    for change in changes.read() {
        let snapshot = query
            .get(change.entity)
            .ok()
            .and_then(|shared| shared.get(Tunables::clone));
        info!("'{}' changed on {}: {snapshot:?}", change.property, change.entity);
    }
}
