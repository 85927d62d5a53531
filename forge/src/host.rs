//! The contract between an owning object and its host

use crate::hint::PropertyInfo;
use crate::variant::Variant;

/// The three calls a host makes to inspect an object's dynamic properties
///
/// `PropertyRegistry` implements this directly; an owning object usually
/// holds a registry and forwards each call to it.
pub trait PropertyHost {
    /// Records for every currently visible property, in registration order
    fn property_list(&self) -> Vec<PropertyInfo>;

    /// Current value of `name`, or `Variant::Nil` if it is unknown or unreadable
    fn get_property(&self, name: &str) -> Variant;

    /// Write `value` to `name`, returning whether the write was handled
    fn set_property(&mut self, name: &str, value: Variant) -> bool;
}

/// Receives "property list changed" notifications on the owner thread
///
/// Called synchronously from `write` for immediate notifications, and from
/// `PropertyRegistry::flush_deferred` for debounced ones. It is never called
/// from a timer thread.
pub trait ChangeNotifier: Send + Sync + 'static {
    /// The property list of the owner needs to be re-read; `property` was written
    fn property_list_changed(&self, property: &str);
}

impl<F> ChangeNotifier for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn property_list_changed(&self, property: &str) { self(property); }
}

/// Notifier for owners that do not react to changes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn property_list_changed(&self, _property: &str) {}
}
