//! Per-frame upkeep of forged registries

use bevy::prelude::*;

use crate::component::ForgedProperties;
use crate::plugin::ForgeRuntime;

/// Written once per notifying property write, after the debounce period if any
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct PropertyListChanged {
    /// Entity whose property list should be re-read
    pub entity:   Entity,
    /// Property whose write triggered the notification
    pub property: String,
}

/// Give newly added registries the plugin's timer runtime
pub fn attach_runtime(
    runtime: Option<Res<ForgeRuntime>>,
    mut added: Query<&mut ForgedProperties, Added<ForgedProperties>>,
) {
    let Some(runtime) = runtime else {
        return;
    };
    for mut forged in &mut added {
        forged.registry_mut().set_runtime(runtime.handle().clone());
    }
}

/// Turn queued change notifications into [`PropertyListChanged`] messages
pub fn flush_property_changes(
    mut query: Query<(Entity, &mut ForgedProperties)>,
    mut changed: MessageWriter<PropertyListChanged>,
) {
    for (entity, mut forged) in &mut query {
        for property in forged.take_changes() {
            debug!("Property list changed on {entity}: '{property}'");
            changed.write(PropertyListChanged { entity, property });
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::app::App;
    use export_forge::{ForgeConfig, NotifyMode, Variant};

    use super::*;

    #[derive(Resource, Default)]
    struct Seen(Vec<PropertyListChanged>);

    fn collect(mut reader: MessageReader<PropertyListChanged>, mut seen: ResMut<Seen>) {
        seen.0.extend(reader.read().cloned());
    }

    #[test]
    fn test_writes_become_messages() {
        let mut app = App::new();
        app.add_message::<PropertyListChanged>()
            .init_resource::<Seen>()
            .add_systems(Update, (flush_property_changes, collect).chain());

        let mut forged =
            ForgedProperties::with_config(ForgeConfig::new().with_notify_mode(NotifyMode::Immediate));
        if let Ok(mut builder) = forged.registry_mut().create::<i32>("count") {
            builder.on_set(|_| {});
        }
        let entity = app.world_mut().spawn(forged).id();

        if let Some(mut forged) = app.world_mut().get_mut::<ForgedProperties>(entity) {
            assert!(forged.registry_mut().write("count", &Variant::Int(4)));
        }
        app.update();

        assert_eq!(
            app.world().resource::<Seen>().0,
            [PropertyListChanged {
                entity,
                property: "count".to_string(),
            }]
        );

        app.update();
        assert_eq!(app.world().resource::<Seen>().0.len(), 1);
    }

    #[test]
    fn test_runtime_is_attached_to_new_registries() {
        let Ok(runtime) = ForgeRuntime::new() else {
            return;
        };
        let mut app = App::new();
        app.insert_resource(runtime)
            .add_systems(Update, attach_runtime);

        let entity = app.world_mut().spawn(ForgedProperties::new()).id();
        app.update();

        let attached = app
            .world()
            .get::<ForgedProperties>(entity)
            .is_some_and(|forged| forged.registry().config().runtime().is_some());
        assert!(attached);
    }
}
