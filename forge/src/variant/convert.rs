//! Conversions between Rust values and [`Variant`]

use std::sync::Arc;

use super::object::{EngineClass, ObjectRef};
use super::types::{
    Aabb, Callable, Color, Dictionary, NodePath, Plane, Rect2, Rect2i, Rid, Signal, StringName,
};
use super::{Variant, VariantArray};
use crate::math::{Affine2, Affine3A, IVec2, IVec3, IVec4, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// A Rust type that can travel through a [`Variant`]
///
/// Implementing this trait does not by itself make a type registrable as a
/// property: registration also requires an entry in the value-kind table (see
/// [`ValueKind::of`](super::ValueKind::of)), or an object class.
///
/// `from_variant` coerces the way the host does: integers and floats convert
/// into each other, strings accept the string-like tags, and vectors accept
/// their integer/float twins. It returns `None` when no coercion exists.
pub trait ExportValue: Sized + Send + Sync + 'static {
    /// Wrap this value
    fn to_variant(&self) -> Variant;

    /// Coerce a variant into this type
    fn from_variant(variant: &Variant) -> Option<Self>;

    /// Declared class name when this type is an engine object reference
    #[must_use]
    fn object_class() -> Option<&'static str> { None }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "float to integer coercion truncates toward zero like the host"
)]
fn variant_as_i64(variant: &Variant) -> Option<i64> {
    match variant {
        Variant::Int(value) => Some(*value),
        Variant::Float(value) if value.is_finite() => Some(*value as i64),
        Variant::Bool(value) => Some(i64::from(*value)),
        _ => None,
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "integer to float coercion is lossy on the host as well"
)]
fn variant_as_f64(variant: &Variant) -> Option<f64> {
    match variant {
        Variant::Float(value) => Some(*value),
        Variant::Int(value) => Some(*value as f64),
        Variant::Bool(value) => Some(f64::from(u8::from(*value))),
        _ => None,
    }
}

fn variant_as_str(variant: &Variant) -> Option<&str> {
    match variant {
        Variant::String(value) => Some(value),
        Variant::StringName(value) => Some(value.as_str()),
        Variant::NodePath(value) => Some(value.as_str()),
        _ => None,
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl ExportValue for $ty {
                fn to_variant(&self) -> Variant { Variant::Int(i64::from(*self)) }

                fn from_variant(variant: &Variant) -> Option<Self> {
                    variant_as_i64(variant).and_then(|value| <$ty>::try_from(value).ok())
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32);

impl ExportValue for u64 {
    fn to_variant(&self) -> Variant { Variant::Int(i64::try_from(*self).unwrap_or(i64::MAX)) }

    fn from_variant(variant: &Variant) -> Option<Self> {
        variant_as_i64(variant).and_then(|value| Self::try_from(value).ok())
    }
}

impl ExportValue for f64 {
    fn to_variant(&self) -> Variant { Variant::Float(*self) }

    fn from_variant(variant: &Variant) -> Option<Self> { variant_as_f64(variant) }
}

impl ExportValue for f32 {
    fn to_variant(&self) -> Variant { Variant::Float(f64::from(*self)) }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "the host stores floats as f64 and narrows on read"
    )]
    fn from_variant(variant: &Variant) -> Option<Self> {
        variant_as_f64(variant).map(|value| value as Self)
    }
}

impl ExportValue for bool {
    fn to_variant(&self) -> Variant { Variant::Bool(*self) }

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Bool(value) => Some(*value),
            Variant::Int(value) => Some(*value != 0),
            Variant::Float(value) => Some(*value != 0.0),
            _ => None,
        }
    }
}

impl ExportValue for String {
    fn to_variant(&self) -> Variant { Variant::String(self.clone()) }

    fn from_variant(variant: &Variant) -> Option<Self> {
        variant_as_str(variant).map(ToString::to_string)
    }
}

impl ExportValue for StringName {
    fn to_variant(&self) -> Variant { Variant::StringName(self.clone()) }

    fn from_variant(variant: &Variant) -> Option<Self> { variant_as_str(variant).map(Self::from) }
}

impl ExportValue for NodePath {
    fn to_variant(&self) -> Variant { Variant::NodePath(self.clone()) }

    fn from_variant(variant: &Variant) -> Option<Self> { variant_as_str(variant).map(Self::from) }
}

macro_rules! impl_vector {
    ($float:ty => $float_tag:ident, $int:ty => $int_tag:ident, $as_float:ident, $as_int:ident) => {
        impl ExportValue for $float {
            fn to_variant(&self) -> Variant { Variant::$float_tag(*self) }

            fn from_variant(variant: &Variant) -> Option<Self> {
                match variant {
                    Variant::$float_tag(value) => Some(*value),
                    Variant::$int_tag(value) => Some(value.$as_float()),
                    _ => None,
                }
            }
        }

        impl ExportValue for $int {
            fn to_variant(&self) -> Variant { Variant::$int_tag(*self) }

            fn from_variant(variant: &Variant) -> Option<Self> {
                match variant {
                    Variant::$int_tag(value) => Some(*value),
                    Variant::$float_tag(value) => Some(value.$as_int()),
                    _ => None,
                }
            }
        }
    };
}

impl_vector!(Vec2 => Vector2, IVec2 => Vector2i, as_vec2, as_ivec2);
impl_vector!(Vec3 => Vector3, IVec3 => Vector3i, as_vec3, as_ivec3);
impl_vector!(Vec4 => Vector4, IVec4 => Vector4i, as_vec4, as_ivec4);

macro_rules! impl_exact {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl ExportValue for $ty {
                fn to_variant(&self) -> Variant { Variant::$tag(self.clone()) }

                fn from_variant(variant: &Variant) -> Option<Self> {
                    match variant {
                        Variant::$tag(value) => Some(value.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_exact!(
    Rect2 => Rect2,
    Rect2i => Rect2i,
    Affine2 => Transform2D,
    Plane => Plane,
    Quat => Quaternion,
    Aabb => Aabb,
    Mat3 => Basis,
    Affine3A => Transform3D,
    Mat4 => Projection,
    Color => Color,
    Rid => Rid,
    Callable => Callable,
    Signal => Signal,
    Dictionary => Dictionary,
    VariantArray => Array,
    Vec<u8> => PackedByteArray,
    Vec<i32> => PackedInt32Array,
    Vec<i64> => PackedInt64Array,
    Vec<f32> => PackedFloat32Array,
    Vec<f64> => PackedFloat64Array,
    Vec<String> => PackedStringArray,
    Vec<Vec2> => PackedVector2Array,
    Vec<Vec3> => PackedVector3Array,
    Vec<Color> => PackedColorArray,
    Vec<Vec4> => PackedVector4Array,
);

impl<T: EngineClass> ExportValue for Option<Arc<T>> {
    fn to_variant(&self) -> Variant {
        Variant::Object(self.as_ref().map(|instance| ObjectRef::new(Arc::clone(instance))))
    }

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Nil | Variant::Object(None) => Some(None),
            Variant::Object(Some(reference)) => reference.downcast::<T>().map(Some),
            _ => None,
        }
    }

    fn object_class() -> Option<&'static str> { Some(T::CLASS_NAME) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::VariantType;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(i32::from_variant(&Variant::Float(3.9)), Some(3));
        assert_eq!(i32::from_variant(&Variant::Bool(true)), Some(1));
        assert_eq!(f32::from_variant(&Variant::Int(4)), Some(4.0));
        assert_eq!(u8::from_variant(&Variant::Int(300)), None);
        assert_eq!(i32::from_variant(&Variant::String("1".to_string())), None);
    }

    #[test]
    fn test_string_like_coercion() {
        assert_eq!(
            String::from_variant(&Variant::StringName(StringName::from("idle"))),
            Some("idle".to_string())
        );
        assert_eq!(
            NodePath::from_variant(&Variant::String("../Player".to_string())),
            Some(NodePath::from("../Player"))
        );
    }

    #[test]
    fn test_vector_twins_coerce() {
        assert_eq!(
            Vec2::from_variant(&Variant::Vector2i(IVec2::new(1, 2))),
            Some(Vec2::new(1.0, 2.0))
        );
        assert_eq!(
            IVec3::from_variant(&Variant::Vector3(Vec3::new(1.7, -2.2, 0.0))),
            Some(IVec3::new(1, -2, 0))
        );
        assert_eq!(Vec4::from_variant(&Variant::Vector2(Vec2::ZERO)), None);
    }

    #[test]
    fn test_object_reference_conversion() {
        struct Texture;

        impl EngineClass for Texture {
            const CLASS_NAME: &'static str = "Texture";
        }

        assert_eq!(<Option<Arc<Texture>>>::object_class(), Some("Texture"));
        assert_eq!(i32::object_class(), None);

        let texture = Some(Arc::new(Texture));
        let variant = texture.to_variant();
        assert_eq!(variant.variant_type(), VariantType::Object);
        assert!(matches!(
            <Option<Arc<Texture>>>::from_variant(&variant),
            Some(Some(_))
        ));
        assert!(matches!(
            <Option<Arc<Texture>>>::from_variant(&Variant::Nil),
            Some(None)
        ));
    }
}
