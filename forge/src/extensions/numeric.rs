//! Range and link hints for numbers and vectors

use std::fmt;

use super::sealed::Sealed;
use crate::builder::PropertyBuilder;
use crate::hint::PropertyHint;
use crate::math::{IVec2, IVec3, IVec4, Vec2, Vec3, Vec4};
use crate::variant::ExportValue;

/// Step used when none is given
pub const DEFAULT_RANGE_STEP: f32 = 0.01;

/// The host's implicit step; a range hint omits the step only when it equals this
pub const HOST_RANGE_STEP: f32 = 0.1;

/// Value types that accept a [`RangeHint`]
pub trait RangeValue: ExportValue + Sealed {}

/// Vector types whose components can be edited linked
pub trait LinkValue: ExportValue + Sealed {}

macro_rules! numeric_markers {
    (range: $($range:ty),*; link: $($link:ty),*) => {
        $(impl Sealed for $range {})*
        $(impl RangeValue for $range {})*
        $(impl LinkValue for $link {})*
    };
}

numeric_markers!(
    range: i32, f32, Vec2, IVec2, Vec3, IVec3, Vec4, IVec4;
    link: Vec2, IVec2, Vec3, IVec3, Vec4, IVec4
);

/// Slider bounds and options, serialized to a `RANGE` hint string
///
/// ```
/// use export_forge::RangeHint;
///
/// let hint = RangeHint::new(0.0, 360.0).step(1.0).degrees().suffix("deg");
/// assert_eq!(hint.to_string(), "0, 360, 1, degrees, suffix:deg");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent host option"
)]
pub struct RangeHint {
    min:                f32,
    max:                f32,
    step:               f32,
    exp:                bool,
    or_greater:         bool,
    or_less:            bool,
    radians_as_degrees: bool,
    degrees:            bool,
    hide_slider:        bool,
    suffix:             String,
}

impl RangeHint {
    /// Range from `min` to `max` with the default step
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            step: DEFAULT_RANGE_STEP,
            exp: false,
            or_greater: false,
            or_less: false,
            radians_as_degrees: false,
            degrees: false,
            hide_slider: false,
            suffix: String::new(),
        }
    }

    /// Slider increment
    #[must_use]
    pub const fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Edit on an exponential scale
    #[must_use]
    pub const fn exp(mut self) -> Self {
        self.exp = true;
        self
    }

    /// Allow values above `max`
    #[must_use]
    pub const fn or_greater(mut self) -> Self {
        self.or_greater = true;
        self
    }

    /// Allow values below `min`
    #[must_use]
    pub const fn or_less(mut self) -> Self {
        self.or_less = true;
        self
    }

    /// Store radians, edit degrees
    #[must_use]
    pub const fn radians_as_degrees(mut self) -> Self {
        self.radians_as_degrees = true;
        self
    }

    /// Show the value as degrees
    #[must_use]
    pub const fn degrees(mut self) -> Self {
        self.degrees = true;
        self
    }

    /// Hide the slider, keep the spin box
    #[must_use]
    pub const fn hide_slider(mut self) -> Self {
        self.hide_slider = true;
        self
    }

    /// Unit label shown after the value
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl fmt::Display for RangeHint {
    #[allow(clippy::float_cmp, reason = "exact match against the host default")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.min, self.max)?;

        if self.step != HOST_RANGE_STEP {
            write!(f, ", {}", self.step)?;
        }

        let options = [
            (self.exp, "exp"),
            (self.or_greater, "or_greater"),
            (self.or_less, "or_less"),
            (self.radians_as_degrees, "radians_as_degrees"),
            (self.degrees, "degrees"),
            (self.hide_slider, "hide_slider"),
        ];
        for (_, option) in options.iter().filter(|(enabled, _)| *enabled) {
            write!(f, ", {option}")?;
        }

        if !self.suffix.is_empty() {
            write!(f, ", suffix:{}", self.suffix)?;
        }
        Ok(())
    }
}

impl<T: RangeValue> PropertyBuilder<'_, T> {
    /// Constrain the value (or each component) to a slider range
    pub fn range(&mut self, range: RangeHint) -> &mut Self {
        self.hint(PropertyHint::Range, range.to_string())
    }
}

impl<T: LinkValue> PropertyBuilder<'_, T> {
    /// Edit all components together
    pub fn link(&mut self) -> &mut Self { self.hint(PropertyHint::Link, "") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_is_always_written() {
        assert_eq!(RangeHint::new(0.0, 100.0).to_string(), "0, 100, 0.01");
        assert_eq!(RangeHint::new(0.0, 100.0).step(1.0).to_string(), "0, 100, 1");
    }

    #[test]
    fn test_host_step_is_omitted() {
        assert_eq!(RangeHint::new(-1.5, 1.5).step(0.1).to_string(), "-1.5, 1.5");
    }

    #[test]
    fn test_options_keep_host_order() {
        let hint = RangeHint::new(0.0, 10.0)
            .suffix("m")
            .hide_slider()
            .or_less()
            .exp()
            .or_greater();

        assert_eq!(
            hint.to_string(),
            "0, 10, 0.01, exp, or_greater, or_less, hide_slider, suffix:m"
        );
    }

    #[test]
    fn test_radians_as_degrees() {
        let hint = RangeHint::new(0.0, 3.5).step(0.1).radians_as_degrees();
        assert_eq!(hint.to_string(), "0, 3.5, radians_as_degrees");
    }
}
