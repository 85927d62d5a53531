//! Value-kind table: Rust type → host tag, resolved at registration

use std::any::TypeId;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{
    Aabb, Callable, Color, Dictionary, NodePath, Plane, Rect2, Rect2i, Rid, Signal, StringName,
};
use super::{ExportValue, VariantArray, VariantType};
use crate::error::{Error, Result};
use crate::math::{Affine2, Affine3A, IVec2, IVec3, IVec4, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Closed mapping of registrable property types
///
/// Only these types (plus engine object references) may back a property. Other
/// `ExportValue` types such as `i64` or `f64` can be carried in a `Variant` but
/// are rejected at registration.
static VALUE_KIND_TABLE: Lazy<HashMap<TypeId, VariantType>> = Lazy::new(|| {
    HashMap::from([
        (TypeId::of::<i32>(), VariantType::Int),
        (TypeId::of::<f32>(), VariantType::Float),
        (TypeId::of::<String>(), VariantType::String),
        (TypeId::of::<bool>(), VariantType::Bool),
        (TypeId::of::<Vec2>(), VariantType::Vector2),
        (TypeId::of::<IVec2>(), VariantType::Vector2i),
        (TypeId::of::<Rect2>(), VariantType::Rect2),
        (TypeId::of::<Rect2i>(), VariantType::Rect2i),
        (TypeId::of::<Vec3>(), VariantType::Vector3),
        (TypeId::of::<IVec3>(), VariantType::Vector3i),
        (TypeId::of::<Affine2>(), VariantType::Transform2D),
        (TypeId::of::<Vec4>(), VariantType::Vector4),
        (TypeId::of::<IVec4>(), VariantType::Vector4i),
        (TypeId::of::<Plane>(), VariantType::Plane),
        (TypeId::of::<Quat>(), VariantType::Quaternion),
        (TypeId::of::<Aabb>(), VariantType::Aabb),
        (TypeId::of::<Mat3>(), VariantType::Basis),
        (TypeId::of::<Affine3A>(), VariantType::Transform3D),
        (TypeId::of::<Mat4>(), VariantType::Projection),
        (TypeId::of::<Color>(), VariantType::Color),
        (TypeId::of::<StringName>(), VariantType::StringName),
        (TypeId::of::<NodePath>(), VariantType::NodePath),
        (TypeId::of::<Rid>(), VariantType::Rid),
        (TypeId::of::<Callable>(), VariantType::Callable),
        (TypeId::of::<Signal>(), VariantType::Signal),
        (TypeId::of::<Dictionary>(), VariantType::Dictionary),
        (TypeId::of::<VariantArray>(), VariantType::Array),
        (TypeId::of::<Vec<u8>>(), VariantType::PackedByteArray),
        (TypeId::of::<Vec<i32>>(), VariantType::PackedInt32Array),
        (TypeId::of::<Vec<i64>>(), VariantType::PackedInt64Array),
        (TypeId::of::<Vec<f32>>(), VariantType::PackedFloat32Array),
        (TypeId::of::<Vec<f64>>(), VariantType::PackedFloat64Array),
        (TypeId::of::<Vec<String>>(), VariantType::PackedStringArray),
        (TypeId::of::<Vec<Vec2>>(), VariantType::PackedVector2Array),
        (TypeId::of::<Vec<Vec3>>(), VariantType::PackedVector3Array),
        (TypeId::of::<Vec<Color>>(), VariantType::PackedColorArray),
        (TypeId::of::<Vec<Vec4>>(), VariantType::PackedVector4Array),
    ])
});

/// Resolved value kind of a registered property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A built-in value with a fixed tag
    Builtin(VariantType),
    /// A reference to an engine object of the named class
    Object {
        /// Declared class name, reported as the resource-type hint
        class_name: &'static str,
    },
}

impl ValueKind {
    /// Resolve the kind of `T`
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedValueKind`] when `T` is neither an engine object
    /// reference nor listed in the value-kind table.
    pub fn of<T: ExportValue>() -> Result<Self> {
        if let Some(class_name) = T::object_class() {
            return Ok(Self::Object { class_name });
        }

        VALUE_KIND_TABLE
            .get(&TypeId::of::<T>())
            .copied()
            .map(Self::Builtin)
            .ok_or_else(Error::unsupported::<T>)
    }

    /// Tag reported to the host
    #[must_use]
    pub const fn variant_type(self) -> VariantType {
        match self {
            Self::Builtin(variant_type) => variant_type,
            Self::Object { .. } => VariantType::Object,
        }
    }

    /// Name used when this kind appears inside a collection type hint
    #[must_use]
    pub const fn hint_name(self) -> &'static str {
        match self {
            Self::Builtin(variant_type) => variant_type.type_name(),
            Self::Object { class_name } => class_name,
        }
    }

    /// Whether this kind is an engine object reference
    #[must_use]
    pub const fn is_object(self) -> bool { matches!(self, Self::Object { .. }) }
}
