//! Tests for registration, listing and get/set dispatch

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "tests fail loudly on broken setup"
)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strum_macros::VariantNames;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use super::*;
use crate::config::{NotifyMode, NotifyPolicy};
use crate::extensions::RangeHint;
use crate::hint::{PropertyHint, PropertyUsageFlags};
use crate::host::NoopNotifier;
use crate::math::Vec3;
use crate::variant::{Callable, Color, EngineClass, VariantArray, VariantType};

struct Texture;

impl EngineClass for Texture {
    const CLASS_NAME: &'static str = "Texture";
}

#[derive(VariantNames)]
#[allow(dead_code, reason = "only the names are listed")]
enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Route registry logs to the test output; filter with `RUST_LOG`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish()
        .try_init();
}

fn silent_registry() -> PropertyRegistry {
    init_tracing();
    PropertyRegistry::with_config(
        NoopNotifier,
        ForgeConfig::new().with_notify_mode(NotifyMode::Silent),
    )
}

/// Registry whose notifier records every property name it is called with
fn recording_registry(config: ForgeConfig) -> (PropertyRegistry, Arc<Mutex<Vec<String>>>) {
    init_tracing();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let registry = PropertyRegistry::with_config(
        move |name: &str| sink.lock().unwrap().push(name.to_string()),
        config,
    );
    (registry, seen)
}

fn shared_f32(initial: f32) -> Arc<Mutex<f32>> { Arc::new(Mutex::new(initial)) }

fn bind_f32(registry: &mut PropertyRegistry, name: &str, value: &Arc<Mutex<f32>>) {
    let read = Arc::clone(value);
    let write = Arc::clone(value);
    registry
        .create::<f32>(name)
        .unwrap()
        .on_get(move || *read.lock().unwrap())
        .on_set(move |v| *write.lock().unwrap() = v);
}

#[test]
fn test_float_property_record() {
    let mut registry = silent_registry();
    bind_f32(&mut registry, "speed", &shared_f32(5.0));

    let records = registry.list_all();
    assert_eq!(
        records,
        vec![PropertyInfo {
            name:         "speed".to_string(),
            variant_type: VariantType::Float,
            hint:         PropertyHint::None,
            hint_string:  String::new(),
            usage:        PropertyUsageFlags::DEFAULT,
        }]
    );
    assert_eq!(registry.read("speed"), Variant::Float(5.0));
}

#[test]
fn test_range_applied_before_first_list() {
    let mut registry = silent_registry();
    bind_f32(&mut registry, "speed", &shared_f32(0.0));
    registry
        .property_mut::<f32>("speed")
        .unwrap()
        .range(RangeHint::new(0.0, 100.0));

    let record = &registry.list_all()[0];
    assert_eq!(record.hint, PropertyHint::Range);
    assert_eq!(record.hint_string, "0, 100, 0.01");
}

#[test]
fn test_object_reference_record() {
    let mut registry = silent_registry();
    registry
        .create::<Option<Arc<Texture>>>("albedo")
        .unwrap()
        .on_get(|| None);

    let record = &registry.list_all()[0];
    assert_eq!(i32::from(record.variant_type), 24);
    assert_eq!(i32::from(record.hint), 17);
    assert_eq!(record.hint_string, "Texture");
    assert_eq!(registry.read("albedo"), Variant::Object(None));
}

#[test]
fn test_create_rejects_duplicates_and_keeps_first() {
    let mut registry = silent_registry();
    bind_f32(&mut registry, "speed", &shared_f32(1.0));

    let duplicate = registry.create::<String>("speed").err();
    assert_eq!(duplicate, Some(Error::duplicate_name("speed")));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.read("speed"), Variant::Float(1.0));
    assert_eq!(registry.list_all()[0].variant_type, VariantType::Float);
}

#[test]
fn test_unsupported_kind_registers_nothing() {
    let mut registry = silent_registry();
    let result = registry.create::<f64>("ratio").err();

    assert_eq!(result, Some(Error::unsupported::<f64>()));
    assert!(!registry.contains("ratio"));
    assert!(registry.is_empty());
}

#[test]
fn test_property_mut_checks_type() {
    let mut registry = silent_registry();
    registry.create::<i32>("count").unwrap();

    assert!(registry.property_mut::<i32>("count").is_some());
    assert!(registry.property_mut::<f32>("count").is_none());
    assert!(registry.property_mut::<i32>("missing").is_none());
}

#[test]
fn test_unknown_names_fall_through() {
    let (mut registry, seen) =
        recording_registry(ForgeConfig::new().with_notify_mode(NotifyMode::Immediate));
    assert_eq!(registry.read("missing"), Variant::Nil);
    assert!(!registry.write("missing", &Variant::Int(1)));

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(registry.flush_deferred(), 0);
}

#[test]
fn test_missing_accessors() {
    let mut registry = silent_registry();
    registry.create::<i32>("write_only").unwrap().on_set(|_| {});
    registry.create::<i32>("read_only").unwrap().on_get(|| 7);

    assert_eq!(registry.read("write_only"), Variant::Nil);
    assert!(registry.write("write_only", &Variant::Int(1)));
    assert_eq!(registry.read("read_only"), Variant::Int(7));
    assert!(!registry.write("read_only", &Variant::Int(1)));
}

#[test]
fn test_write_coerces_or_rejects() {
    let mut registry = silent_registry();
    let speed = shared_f32(0.0);
    bind_f32(&mut registry, "speed", &speed);

    assert!(registry.write("speed", &Variant::Int(3)));
    assert!((*speed.lock().unwrap() - 3.0).abs() < f32::EPSILON);

    assert!(!registry.write("speed", &Variant::String("fast".to_string())));
    assert!((*speed.lock().unwrap() - 3.0).abs() < f32::EPSILON);
}

#[test]
fn test_visibility_predicate_is_reevaluated() {
    let mut registry = silent_registry();
    let advanced = Arc::new(AtomicBool::new(false));

    registry.create::<bool>("advanced").unwrap().on_get({
        let advanced = Arc::clone(&advanced);
        move || advanced.load(Ordering::SeqCst)
    });
    registry.create::<i32>("detail").unwrap().when({
        let advanced = Arc::clone(&advanced);
        move || advanced.load(Ordering::SeqCst)
    });

    let names = |registry: &PropertyRegistry| {
        registry
            .list_all()
            .into_iter()
            .map(|record| record.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(&registry), ["advanced"]);
    advanced.store(true, Ordering::SeqCst);
    assert_eq!(names(&registry), ["advanced", "detail"]);
    advanced.store(false, Ordering::SeqCst);
    assert_eq!(names(&registry), ["advanced"]);
}

#[test]
fn test_configuration_after_first_list_is_ignored() {
    let mut registry = silent_registry();
    registry.create::<String>("title").unwrap().placeholder("Untitled");

    let first = registry.list_all();
    assert!(registry.property("title").unwrap().is_sealed());

    let mut builder = registry.property_mut::<String>("title").unwrap();
    assert!(builder.is_sealed());
    builder.multiline().read_only();

    assert_eq!(registry.list_all(), first);
    assert_eq!(first[0].hint, PropertyHint::PlaceholderText);
    assert_eq!(first[0].hint_string, "Untitled");
}

#[test]
fn test_typed_extensions() {
    let mut registry = silent_registry();
    registry.create::<i32>("difficulty").unwrap().enum_of::<Difficulty>();
    registry.create::<i32>("layers").unwrap().flags::<Difficulty>();
    registry.create::<String>("secret").unwrap().password();
    registry.create::<Color>("tint").unwrap().no_alpha();
    registry.create::<Vec3>("scale").unwrap().link();
    registry
        .create::<Callable>("bake")
        .unwrap()
        .tool_button("Bake", Some("Bake"));
    registry
        .create::<VariantArray>("waypoints")
        .unwrap()
        .array_type::<Vec3>();
    registry
        .create::<crate::variant::Dictionary>("lookup")
        .unwrap()
        .dictionary_type::<String, i32>();

    let hints: Vec<(PropertyHint, String)> = registry
        .list_all()
        .into_iter()
        .map(|record| (record.hint, record.hint_string))
        .collect();

    assert_eq!(
        hints,
        [
            (PropertyHint::Enum, "Easy,Normal,Hard".to_string()),
            (PropertyHint::Flags, "Easy,Normal,Hard".to_string()),
            (PropertyHint::Password, String::new()),
            (PropertyHint::ColorNoAlpha, String::new()),
            (PropertyHint::Link, String::new()),
            (PropertyHint::ToolButton, "Bake,Bake".to_string()),
            (PropertyHint::ArrayType, "Vector3".to_string()),
            (PropertyHint::ArrayType, "String,int".to_string()),
        ]
    );
}

#[test]
fn test_host_contract_delegates() {
    let mut registry = silent_registry();
    bind_f32(&mut registry, "speed", &shared_f32(2.0));

    let host: &mut dyn PropertyHost = &mut registry;
    assert_eq!(host.property_list().len(), 1);
    assert!(host.set_property("speed", Variant::Float(4.0)));
    assert_eq!(host.get_property("speed"), Variant::Float(4.0));
}

#[test]
fn test_immediate_notify_runs_on_write() {
    let (mut registry, seen) =
        recording_registry(ForgeConfig::new().with_notify_mode(NotifyMode::Immediate));
    registry.create::<bool>("enabled").unwrap().on_set(|_| {});

    assert!(registry.write("enabled", &Variant::Bool(true)));
    assert!(!registry.write("enabled", &Variant::String("yes".to_string())));
    assert_eq!(*seen.lock().unwrap(), ["enabled"]);
    assert_eq!(registry.flush_deferred(), 0);
}

#[test]
fn test_debounced_without_runtime_notifies_immediately() {
    let (mut registry, seen) = recording_registry(ForgeConfig::new());
    registry
        .create::<i32>("count")
        .unwrap()
        .on_set_with(|_| {}, NotifyPolicy::Debounced(Duration::from_millis(10)));

    assert!(registry.write("count", &Variant::Int(1)));
    assert_eq!(*seen.lock().unwrap(), ["count"]);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_writes_coalesce_until_flush() {
    let delay = Duration::from_millis(250);
    let (mut registry, seen) = recording_registry(ForgeConfig::new());
    let writes = Arc::new(AtomicUsize::new(0));
    registry.create::<i32>("count").unwrap().on_set_with(
        {
            let writes = Arc::clone(&writes);
            move |_| {
                writes.fetch_add(1, Ordering::SeqCst);
            }
        },
        NotifyPolicy::Debounced(delay),
    );

    for value in 0..3 {
        assert!(registry.write("count", &Variant::Int(value)));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(writes.load(Ordering::SeqCst), 3);
    assert_eq!(registry.flush_deferred(), 0);

    tokio::time::sleep(delay).await;
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(registry.flush_deferred(), 1);
    assert_eq!(*seen.lock().unwrap(), ["count"]);

    tokio::time::sleep(delay * 2).await;
    assert_eq!(registry.flush_deferred(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_registry_never_notifies() {
    let delay = Duration::from_millis(50);
    let (mut registry, seen) = recording_registry(ForgeConfig::new());
    registry
        .create::<bool>("enabled")
        .unwrap()
        .on_set_with(|_| {}, NotifyPolicy::Debounced(delay));

    assert!(registry.write("enabled", &Variant::Bool(true)));
    drop(registry);

    tokio::time::sleep(delay * 2).await;
    assert!(seen.lock().unwrap().is_empty());
}
