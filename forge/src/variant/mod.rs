//! Tagged value model exchanged with the host
//!
//! A [`Variant`] is the opaque value the host hands to `set` and receives from
//! `get`. [`VariantType`] is the closed tag enumeration the host uses in
//! property records; its integer codes match the Godot 4 `Variant.Type` table.

mod convert;
mod kind;
mod object;
mod types;

pub use convert::ExportValue;
pub use kind::ValueKind;
pub use object::{EngineClass, ObjectRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{EnumIter, FromRepr};
pub use types::{
    Aabb, Callable, Color, Dictionary, NodePath, Plane, Rect2, Rect2i, Rid, Signal, StringName,
    VariantArray,
};

use crate::math::{Affine2, Affine3A, IVec2, IVec3, IVec4, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Value-kind tag reported in property records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
#[allow(missing_docs, reason = "variants mirror the host tag table")]
pub enum VariantType {
    Nil                = 0,
    Bool               = 1,
    Int                = 2,
    Float              = 3,
    String             = 4,
    Vector2            = 5,
    Vector2i           = 6,
    Rect2              = 7,
    Rect2i             = 8,
    Vector3            = 9,
    Vector3i           = 10,
    Transform2D        = 11,
    Vector4            = 12,
    Vector4i           = 13,
    Plane              = 14,
    Quaternion         = 15,
    Aabb               = 16,
    Basis              = 17,
    Transform3D        = 18,
    Projection         = 19,
    Color              = 20,
    StringName         = 21,
    NodePath           = 22,
    Rid                = 23,
    Object             = 24,
    Callable           = 25,
    Signal             = 26,
    Dictionary         = 27,
    Array              = 28,
    PackedByteArray    = 29,
    PackedInt32Array   = 30,
    PackedInt64Array   = 31,
    PackedFloat32Array = 32,
    PackedFloat64Array = 33,
    PackedStringArray  = 34,
    PackedVector2Array = 35,
    PackedVector3Array = 36,
    PackedColorArray   = 37,
    PackedVector4Array = 38,
}

impl VariantType {
    /// Host-side type name, as used in array and dictionary type hints
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "String",
            Self::Vector2 => "Vector2",
            Self::Vector2i => "Vector2i",
            Self::Rect2 => "Rect2",
            Self::Rect2i => "Rect2i",
            Self::Vector3 => "Vector3",
            Self::Vector3i => "Vector3i",
            Self::Transform2D => "Transform2D",
            Self::Vector4 => "Vector4",
            Self::Vector4i => "Vector4i",
            Self::Plane => "Plane",
            Self::Quaternion => "Quaternion",
            Self::Aabb => "AABB",
            Self::Basis => "Basis",
            Self::Transform3D => "Transform3D",
            Self::Projection => "Projection",
            Self::Color => "Color",
            Self::StringName => "StringName",
            Self::NodePath => "NodePath",
            Self::Rid => "RID",
            Self::Object => "Object",
            Self::Callable => "Callable",
            Self::Signal => "Signal",
            Self::Dictionary => "Dictionary",
            Self::Array => "Array",
            Self::PackedByteArray => "PackedByteArray",
            Self::PackedInt32Array => "PackedInt32Array",
            Self::PackedInt64Array => "PackedInt64Array",
            Self::PackedFloat32Array => "PackedFloat32Array",
            Self::PackedFloat64Array => "PackedFloat64Array",
            Self::PackedStringArray => "PackedStringArray",
            Self::PackedVector2Array => "PackedVector2Array",
            Self::PackedVector3Array => "PackedVector3Array",
            Self::PackedColorArray => "PackedColorArray",
            Self::PackedVector4Array => "PackedVector4Array",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl From<VariantType> for i32 {
    fn from(value: VariantType) -> Self { value as Self }
}

impl TryFrom<i32> for VariantType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or_else(|| format!("Invalid variant type code: {value}"))
    }
}

/// Opaque tagged value passed through `get` and `set`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "variants mirror the host tag table")]
pub enum Variant {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vector2(Vec2),
    Vector2i(IVec2),
    Rect2(Rect2),
    Rect2i(Rect2i),
    Vector3(Vec3),
    Vector3i(IVec3),
    Transform2D(Affine2),
    Vector4(Vec4),
    Vector4i(IVec4),
    Plane(Plane),
    Quaternion(Quat),
    Aabb(Aabb),
    Basis(Mat3),
    Transform3D(Affine3A),
    Projection(Mat4),
    Color(Color),
    StringName(StringName),
    NodePath(NodePath),
    Rid(Rid),
    // Live object handles cannot be rebuilt from JSON
    #[serde(skip_deserializing)]
    Object(Option<ObjectRef>),
    Callable(Callable),
    Signal(Signal),
    Dictionary(Dictionary),
    Array(VariantArray),
    PackedByteArray(Vec<u8>),
    PackedInt32Array(Vec<i32>),
    PackedInt64Array(Vec<i64>),
    PackedFloat32Array(Vec<f32>),
    PackedFloat64Array(Vec<f64>),
    PackedStringArray(Vec<String>),
    PackedVector2Array(Vec<Vec2>),
    PackedVector3Array(Vec<Vec3>),
    PackedColorArray(Vec<Color>),
    PackedVector4Array(Vec<Vec4>),
}

impl Variant {
    /// Tag of the value currently held
    #[must_use]
    pub const fn variant_type(&self) -> VariantType {
        match self {
            Self::Nil => VariantType::Nil,
            Self::Bool(_) => VariantType::Bool,
            Self::Int(_) => VariantType::Int,
            Self::Float(_) => VariantType::Float,
            Self::String(_) => VariantType::String,
            Self::Vector2(_) => VariantType::Vector2,
            Self::Vector2i(_) => VariantType::Vector2i,
            Self::Rect2(_) => VariantType::Rect2,
            Self::Rect2i(_) => VariantType::Rect2i,
            Self::Vector3(_) => VariantType::Vector3,
            Self::Vector3i(_) => VariantType::Vector3i,
            Self::Transform2D(_) => VariantType::Transform2D,
            Self::Vector4(_) => VariantType::Vector4,
            Self::Vector4i(_) => VariantType::Vector4i,
            Self::Plane(_) => VariantType::Plane,
            Self::Quaternion(_) => VariantType::Quaternion,
            Self::Aabb(_) => VariantType::Aabb,
            Self::Basis(_) => VariantType::Basis,
            Self::Transform3D(_) => VariantType::Transform3D,
            Self::Projection(_) => VariantType::Projection,
            Self::Color(_) => VariantType::Color,
            Self::StringName(_) => VariantType::StringName,
            Self::NodePath(_) => VariantType::NodePath,
            Self::Rid(_) => VariantType::Rid,
            Self::Object(_) => VariantType::Object,
            Self::Callable(_) => VariantType::Callable,
            Self::Signal(_) => VariantType::Signal,
            Self::Dictionary(_) => VariantType::Dictionary,
            Self::Array(_) => VariantType::Array,
            Self::PackedByteArray(_) => VariantType::PackedByteArray,
            Self::PackedInt32Array(_) => VariantType::PackedInt32Array,
            Self::PackedInt64Array(_) => VariantType::PackedInt64Array,
            Self::PackedFloat32Array(_) => VariantType::PackedFloat32Array,
            Self::PackedFloat64Array(_) => VariantType::PackedFloat64Array,
            Self::PackedStringArray(_) => VariantType::PackedStringArray,
            Self::PackedVector2Array(_) => VariantType::PackedVector2Array,
            Self::PackedVector3Array(_) => VariantType::PackedVector3Array,
            Self::PackedColorArray(_) => VariantType::PackedColorArray,
            Self::PackedVector4Array(_) => VariantType::PackedVector4Array,
        }
    }

    /// Whether this is the empty value
    #[must_use]
    pub const fn is_nil(&self) -> bool { matches!(self, Self::Nil) }

    /// Build a variant from its typed value
    pub fn from_value<T: ExportValue>(value: &T) -> Self { value.to_variant() }

    /// Coerce this variant into a typed value
    #[must_use]
    pub fn to<T: ExportValue>(&self) -> Option<T> { T::from_variant(self) }

    /// Decode a JSON value sent by a remote host
    ///
    /// Accepts the tagged form produced by [`Variant::to_json`] (`{"Vector2": [1.0, 2.0]}`)
    /// as well as plain JSON scalars, arrays and objects, which map to
    /// `Bool`/`Int`/`Float`/`String`/`Array`/`Dictionary`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Nil),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::Array),
            Value::Object(map) => Some(Self::from_json_object(map)),
        }
    }

    fn from_json_object(map: &Map<String, Value>) -> Self {
        if map.len() == 1 {
            // Only an empty object reference survives the trip through JSON
            if matches!(map.get("Object"), Some(Value::Null)) {
                return Self::Object(None);
            }
            if let Ok(tagged) = serde_json::from_value::<Self>(Value::Object(map.clone())) {
                return tagged;
            }
        }

        let entries = map
            .iter()
            .map(|(key, value)| {
                (
                    Self::String(key.clone()),
                    Self::from_json(value).unwrap_or_default(),
                )
            })
            .collect();
        Self::Dictionary(Dictionary::from_entries(entries))
    }

    /// Encode this variant in its tagged JSON form
    ///
    /// `Nil` encodes as `null`, so [`Variant::from_json`] reads back every
    /// value except a live object reference.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Nil => Value::Null,
            other => serde_json::to_value(other).unwrap_or(Value::Null),
        }
    }
}
