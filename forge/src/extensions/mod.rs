//! Typed shortcuts over [`PropertyBuilder::hint`](crate::PropertyBuilder::hint)
//!
//! Each shortcut is only available on builders whose value type the hint makes
//! sense for. `range` exists on numeric and vector properties, `no_alpha` on
//! colors, and so on.

mod choice;
mod collection;
mod numeric;
mod text;
mod widget;

pub use choice::ChoiceValue;
pub use numeric::{LinkValue, RangeHint, RangeValue};

mod sealed {
    pub trait Sealed {}
}
