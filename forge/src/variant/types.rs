//! Engine value types that have no `glam` counterpart

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Variant;
use crate::math::{IVec2, Vec2, Vec3};

/// Untyped array of variants
pub type VariantArray = Vec<Variant>;

/// Axis-aligned 2D rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect2 {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size:     Vec2,
}

impl Rect2 {
    /// Create a rectangle from position and size
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self { Self { position, size } }
}

/// Axis-aligned 2D rectangle with integer coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect2i {
    /// Top-left corner
    pub position: IVec2,
    /// Width and height
    pub size:     IVec2,
}

impl Rect2i {
    /// Create a rectangle from position and size
    #[must_use]
    pub const fn new(position: IVec2, size: IVec2) -> Self { Self { position, size } }
}

/// Plane in Hessian normal form
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Distance from the origin along the normal
    pub d:      f32,
}

/// Axis-aligned 3D bounding box
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub position: Vec3,
    /// Extent along each axis
    pub size:     Vec3,
}

/// RGBA color with float channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self { Self::WHITE }
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque color from red, green and blue channels
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self { Self { r, g, b, a: 1.0 } }

    /// Color from all four channels
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self { Self { r, g, b, a } }
}

/// Interned-style string used for identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringName(pub String);

/// Path to a node in the host's scene tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(pub String);

macro_rules! impl_string_newtype {
    ($($ty:ident),*) => {
        $(
            impl From<&str> for $ty {
                fn from(value: &str) -> Self { Self(value.to_string()) }
            }

            impl From<String> for $ty {
                fn from(value: String) -> Self { Self(value) }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
            }

            impl $ty {
                /// Borrow the underlying string
                #[must_use]
                pub fn as_str(&self) -> &str { &self.0 }
            }
        )*
    };
}

impl_string_newtype!(StringName, NodePath);

/// Opaque resource id owned by a host server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rid(pub u64);

/// Reference to a named signal on a host object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Instance id of the emitting object
    pub object_id: u64,
    /// Signal name
    pub name:      StringName,
}

type CallableFn = Arc<dyn Fn(&[Variant]) -> Variant + Send + Sync>;

/// Named callable handle
///
/// Callables that arrive from a remote host carry only their method name;
/// [`Callable::call`] on such a handle returns `Variant::Nil`.
#[derive(Clone)]
pub struct Callable {
    method:   String,
    function: Option<CallableFn>,
}

impl Callable {
    /// Wrap a function under a method name
    pub fn new(
        method: impl Into<String>,
        function: impl Fn(&[Variant]) -> Variant + Send + Sync + 'static,
    ) -> Self {
        Self {
            method:   method.into(),
            function: Some(Arc::new(function)),
        }
    }

    /// A callable that only names a method
    pub fn named(method: impl Into<String>) -> Self {
        Self {
            method:   method.into(),
            function: None,
        }
    }

    /// Method name
    #[must_use]
    pub fn method(&self) -> &str { &self.method }

    /// Whether this handle can actually be invoked
    #[must_use]
    pub const fn is_valid(&self) -> bool { self.function.is_some() }

    /// Invoke the callable
    #[must_use]
    pub fn call(&self, args: &[Variant]) -> Variant {
        self.function
            .as_ref()
            .map_or(Variant::Nil, |function| function(args))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("method", &self.method)
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && match (&self.function, &other.function) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl Serialize for Callable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.method)
    }
}

impl<'de> Deserialize<'de> for Callable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::named)
    }
}

/// Ordered key/value map of variants
///
/// Keys are compared with `PartialEq`, so float keys behave as the host's do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(Vec<(Variant, Variant)>);

impl Dictionary {
    /// Empty dictionary
    #[must_use]
    pub const fn new() -> Self { Self(Vec::new()) }

    /// Build from entries, later duplicates replacing earlier ones
    #[must_use]
    pub fn from_entries(entries: Vec<(Variant, Variant)>) -> Self {
        let mut dictionary = Self::new();
        for (key, value) in entries {
            dictionary.insert(key, value);
        }
        dictionary
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: Variant, value: Variant) -> Option<Variant> {
        if let Some((_, existing)) = self.0.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.0.push((key, value));
        None
    }

    /// Look up a value by key
    #[must_use]
    pub fn get(&self, key: &Variant) -> Option<&Variant> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries
    #[must_use]
    pub const fn len(&self) -> usize { self.0.len() }

    /// Whether the dictionary has no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variant, &Variant)> {
        self.0.iter().map(|(k, v)| (k, v))
    }
}
