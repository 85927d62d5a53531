//! Typed fluent configuration for one property
//!
//! ```ignore
//! registry
//!     .create::<f32>("speed")?
//!     .on_get(move || speed.get())
//!     .on_set(move |value| speed.set(value))
//!     .range(RangeHint::new(0.0, 100.0));
//! ```
//!
//! Every method returns `&mut Self`, so a builder can be chained from
//! `create` or held in a binding and configured over several statements.

use std::marker::PhantomData;

use crate::config::NotifyPolicy;
use crate::hint::{PropertyHint, PropertyUsageFlags};
use crate::property::ExportProperty;
use crate::variant::{ExportValue, Variant};

/// Typed handle onto a registered property
pub struct PropertyBuilder<'a, T> {
    property:       &'a mut ExportProperty,
    default_notify: NotifyPolicy,
    _value:         PhantomData<fn() -> T>,
}

impl<'a, T: ExportValue> PropertyBuilder<'a, T> {
    pub(crate) const fn new(property: &'a mut ExportProperty, default_notify: NotifyPolicy) -> Self {
        Self {
            property,
            default_notify,
            _value: PhantomData,
        }
    }

    /// Name of the property being configured
    #[must_use]
    pub fn name(&self) -> &str { self.property.name() }

    /// Whether the display record is already frozen
    #[must_use]
    pub fn is_sealed(&self) -> bool { self.property.is_sealed() }

    /// Read the value through `getter`
    pub fn on_get<G>(&mut self, getter: G) -> &mut Self
    where
        G: Fn() -> T + Send + Sync + 'static,
    {
        self.property
            .set_getter(Box::new(move || getter().to_variant()));
        self
    }

    /// Write the value through `setter`, notifying with the registry default
    pub fn on_set<S>(&mut self, setter: S) -> &mut Self
    where
        S: FnMut(T) + Send + Sync + 'static,
    {
        let notify = self.default_notify;
        self.on_set_with(setter, notify)
    }

    /// Write the value through `setter`, notifying with `notify`
    pub fn on_set_with<S>(&mut self, mut setter: S, notify: NotifyPolicy) -> &mut Self
    where
        S: FnMut(T) + Send + Sync + 'static,
    {
        self.property.set_setter(
            Box::new(move |value: &Variant| {
                T::from_variant(value).map(&mut setter).is_some()
            }),
            notify,
        );
        self
    }

    /// Set the hint tag and its payload
    pub fn hint(&mut self, hint: PropertyHint, hint_string: impl Into<String>) -> &mut Self {
        self.property.set_hint(hint, hint_string.into());
        self
    }

    /// Add usage flags
    pub fn add_usage(&mut self, flags: PropertyUsageFlags) -> &mut Self {
        self.property.add_usage(flags);
        self
    }

    /// Remove usage flags
    pub fn remove_usage(&mut self, flags: PropertyUsageFlags) -> &mut Self {
        self.property.remove_usage(flags);
        self
    }

    /// Shown but not editable
    pub fn read_only(&mut self) -> &mut Self { self.add_usage(PropertyUsageFlags::READ_ONLY) }

    /// Only list the property while `predicate` returns true
    pub fn when<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
    {
        self.property.set_visibility(Box::new(predicate));
        self
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    use super::*;
    use crate::variant::{ValueKind, VariantType};

    fn int_property() -> ExportProperty {
        ExportProperty::new(
            "count".to_string(),
            ValueKind::Builtin(VariantType::Int),
            TypeId::of::<i32>(),
        )
    }

    #[test]
    fn test_getter_and_setter_convert_through_variant() {
        let mut property = int_property();
        let stored = Arc::new(AtomicI32::new(3));

        let read = Arc::clone(&stored);
        let write = Arc::clone(&stored);
        PropertyBuilder::<i32>::new(&mut property, NotifyPolicy::Silent)
            .on_get(move || read.load(Ordering::SeqCst))
            .on_set(move |value| write.store(value, Ordering::SeqCst));

        assert_eq!(property.get_value(), Variant::Int(3));
        assert!(property.is_writable());
        assert_eq!(property.notify_policy(), NotifyPolicy::Silent);
    }

    #[test]
    fn test_usage_edits() {
        let mut property = int_property();
        PropertyBuilder::<i32>::new(&mut property, NotifyPolicy::Immediate)
            .read_only()
            .remove_usage(PropertyUsageFlags::STORAGE);

        assert_eq!(
            property.usage(),
            PropertyUsageFlags::EDITOR | PropertyUsageFlags::READ_ONLY
        );
    }

    #[test]
    fn test_explicit_policy_overrides_default() {
        let mut property = int_property();
        PropertyBuilder::<i32>::new(&mut property, NotifyPolicy::Silent)
            .on_set_with(|_| {}, NotifyPolicy::Immediate);

        assert_eq!(property.notify_policy(), NotifyPolicy::Immediate);
    }
}
