//! Enum and bit-flag pickers

use strum::VariantNames;

use super::sealed::Sealed;
use crate::builder::PropertyBuilder;
use crate::hint::PropertyHint;
use crate::variant::ExportValue;

/// Value types that can be edited through an enum picker
pub trait ChoiceValue: ExportValue + Sealed {}

impl Sealed for String {}
impl ChoiceValue for i32 {}
impl ChoiceValue for String {}

fn joined_names<E: VariantNames>() -> String { E::VARIANTS.join(",") }

impl<T: ChoiceValue> PropertyBuilder<'_, T> {
    /// Pick from a comma-separated list such as `"Egg,Hen,Chicken"`
    pub fn as_enum(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint(PropertyHint::Enum, hint)
    }

    /// Pick from the variant names of `E`, in declaration order
    pub fn enum_of<E: VariantNames>(&mut self) -> &mut Self {
        self.as_enum(joined_names::<E>())
    }
}

impl PropertyBuilder<'_, i32> {
    /// Edit as a bit mask named by the variants of `E`
    pub fn flags<E: VariantNames>(&mut self) -> &mut Self {
        self.hint(PropertyHint::Flags, joined_names::<E>())
    }
}

#[cfg(test)]
mod tests {
    use strum_macros::VariantNames;

    use super::*;

    #[derive(VariantNames)]
    #[allow(dead_code, reason = "only the names are used")]
    enum Layer {
        Ground,
        Water,
        Sky,
    }

    #[test]
    fn test_names_keep_declaration_order() {
        assert_eq!(joined_names::<Layer>(), "Ground,Water,Sky");
    }
}
