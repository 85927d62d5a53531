//! Fluent runtime registry of inspector-editable properties
//!
//! An owning object declares properties at runtime and hands them to a host
//! inspector through three calls: list, get and set ([`PropertyHost`]).
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use export_forge::{NoopNotifier, PropertyRegistry, RangeHint, Variant};
//!
//! let speed = Arc::new(Mutex::new(5.0_f32));
//! let mut registry = PropertyRegistry::new(NoopNotifier);
//!
//! let (read, write) = (Arc::clone(&speed), Arc::clone(&speed));
//! registry
//!     .create::<f32>("speed")?
//!     .on_get(move || read.lock().map(|v| *v).unwrap_or_default())
//!     .on_set_with(
//!         move |value| {
//!             if let Ok(mut v) = write.lock() {
//!                 *v = value;
//!             }
//!         },
//!         export_forge::NotifyPolicy::Silent,
//!     )
//!     .range(RangeHint::new(0.0, 100.0));
//!
//! assert_eq!(registry.list_all()[0].hint_string, "0, 100, 0.01");
//! assert!(registry.write("speed", &Variant::Float(12.5)));
//! assert_eq!(registry.read("speed"), Variant::Float(12.5));
//! # Ok::<(), export_forge::Error>(())
//! ```
//!
//! Records and integer codes follow the Godot 4 reflection schema, so a
//! [`PropertyInfo`] can be handed to that host or sent as JSON unchanged.

mod builder;
mod config;
mod debounce;
mod error;
mod extensions;
mod hint;
mod host;
mod property;
mod registry;
pub mod variant;

/// Vector and matrix types used by property values
pub mod math {
    pub use glam::{Affine2, Affine3A, IVec2, IVec3, IVec4, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
}

pub use builder::PropertyBuilder;
pub use config::{DEBOUNCE_ENV_VAR, DEFAULT_DEBOUNCE_MS, ForgeConfig, NotifyMode, NotifyPolicy};
pub use debounce::{DebounceState, Debouncer};
pub use error::{Error, Result};
pub use extensions::{ChoiceValue, LinkValue, RangeHint, RangeValue};
pub use hint::{PropertyHint, PropertyInfo, PropertyUsageFlags};
pub use host::{ChangeNotifier, NoopNotifier, PropertyHost};
pub use property::ExportProperty;
pub use registry::PropertyRegistry;
pub use variant::{
    Aabb, Callable, Color, Dictionary, EngineClass, ExportValue, NodePath, ObjectRef, Plane,
    Rect2, Rect2i, Rid, Signal, StringName, ValueKind, Variant, VariantArray, VariantType,
};
