//! Type-erased property descriptor
//!
//! An [`ExportProperty`] holds everything the registry needs to list, read and
//! write one property. Typed configuration goes through
//! [`PropertyBuilder`](crate::PropertyBuilder); the descriptor itself only sees
//! [`Variant`]s.
//!
//! The display record is built once. The first successful
//! [`ExportProperty::build_record`] seals the descriptor: later hint or usage
//! changes are still stored but never reach the host.

use std::any::TypeId;
use std::fmt;

use once_cell::sync::OnceCell;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};

use crate::config::NotifyPolicy;
use crate::debounce::Debouncer;
use crate::hint::{PropertyHint, PropertyInfo, PropertyUsageFlags};
use crate::host::ChangeNotifier;
use crate::variant::{ValueKind, Variant};

pub(crate) type Getter = Box<dyn Fn() -> Variant + Send + Sync>;
/// Returns `false` when the variant could not be coerced to the property type
pub(crate) type Setter = Box<dyn FnMut(&Variant) -> bool + Send + Sync>;
pub(crate) type Visibility = Box<dyn Fn() -> bool + Send + Sync>;

/// Owner-side channels a write may notify through
pub(crate) struct NotifyContext<'a> {
    pub notifier: &'a dyn ChangeNotifier,
    pub deferred: &'a UnboundedSender<String>,
    pub runtime:  Option<&'a Handle>,
}

/// One registered property
pub struct ExportProperty {
    name:        String,
    kind:        ValueKind,
    value_type:  TypeId,
    getter:      Option<Getter>,
    setter:      Option<Setter>,
    hint:        PropertyHint,
    hint_string: String,
    usage:       PropertyUsageFlags,
    visibility:  Option<Visibility>,
    notify:      NotifyPolicy,
    record:      OnceCell<PropertyInfo>,
    debouncer:   Option<Debouncer>,
}

impl ExportProperty {
    pub(crate) const fn new(name: String, kind: ValueKind, value_type: TypeId) -> Self {
        Self {
            name,
            kind,
            value_type,
            getter: None,
            setter: None,
            hint: PropertyHint::None,
            hint_string: String::new(),
            usage: PropertyUsageFlags::DEFAULT,
            visibility: None,
            notify: NotifyPolicy::Silent,
            record: OnceCell::new(),
            debouncer: None,
        }
    }

    /// Property name
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Resolved value kind
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind { self.kind }

    /// Configured hint tag
    #[must_use]
    pub const fn hint(&self) -> PropertyHint { self.hint }

    /// Configured hint string
    #[must_use]
    pub fn hint_string(&self) -> &str { &self.hint_string }

    /// Configured usage flags
    #[must_use]
    pub const fn usage(&self) -> PropertyUsageFlags { self.usage }

    /// Notification applied after a successful write
    #[must_use]
    pub const fn notify_policy(&self) -> NotifyPolicy { self.notify }

    /// Whether a getter is set
    #[must_use]
    pub const fn is_readable(&self) -> bool { self.getter.is_some() }

    /// Whether a setter is set
    #[must_use]
    pub const fn is_writable(&self) -> bool { self.setter.is_some() }

    /// Whether the record has been built and frozen
    #[must_use]
    pub fn is_sealed(&self) -> bool { self.record.get().is_some() }

    /// Whether the visibility predicate (if any) currently holds
    #[must_use]
    pub fn is_visible(&self) -> bool { self.visibility.as_ref().is_none_or(|visible| visible()) }

    pub(crate) const fn value_type(&self) -> TypeId { self.value_type }

    /// Build the display record
    ///
    /// Returns `None` while the visibility predicate is false; that result is
    /// never cached. Otherwise the first build is cached and returned unchanged
    /// from then on.
    pub fn build_record(&self) -> Option<PropertyInfo> {
        if !self.is_visible() {
            return None;
        }

        Some(
            self.record
                .get_or_init(|| {
                    debug!("Sealing property record for '{}'", self.name);
                    self.make_record()
                })
                .clone(),
        )
    }

    fn make_record(&self) -> PropertyInfo {
        let (hint, hint_string) = match self.kind {
            ValueKind::Object { class_name } => (PropertyHint::ResourceType, class_name.to_string()),
            ValueKind::Builtin(_) => (self.hint, self.hint_string.clone()),
        };

        PropertyInfo {
            name: self.name.clone(),
            variant_type: self.kind.variant_type(),
            hint,
            hint_string,
            usage: self.usage,
        }
    }

    /// Current value, or `Variant::Nil` without a getter
    #[must_use]
    pub fn get_value(&self) -> Variant {
        self.getter.as_ref().map_or(Variant::Nil, |getter| getter())
    }

    pub(crate) fn set_value(&mut self, value: &Variant, context: &NotifyContext<'_>) -> bool {
        let Some(setter) = self.setter.as_mut() else {
            trace!("Property '{}' has no setter", self.name);
            return false;
        };

        if !setter(value) {
            warn!(
                "Rejected write to '{}': {} cannot be coerced to {}",
                self.name,
                value.variant_type(),
                self.kind.variant_type()
            );
            return false;
        }

        self.notify_changed(context);
        true
    }

    fn notify_changed(&mut self, context: &NotifyContext<'_>) {
        match self.notify {
            NotifyPolicy::Silent => {},
            NotifyPolicy::Immediate => context.notifier.property_list_changed(&self.name),
            NotifyPolicy::Debounced(delay) => {
                if self.debouncer.is_none() {
                    let runtime = context
                        .runtime
                        .cloned()
                        .or_else(|| Handle::try_current().ok());
                    let Some(runtime) = runtime else {
                        warn!(
                            "No tokio runtime for debounced notify of '{}'; notifying immediately",
                            self.name
                        );
                        context.notifier.property_list_changed(&self.name);
                        return;
                    };
                    self.debouncer = Some(Debouncer::new(runtime));
                }

                let deferred = context.deferred.clone();
                let name = self.name.clone();
                if let Some(debouncer) = self.debouncer.as_mut() {
                    debouncer.trigger(
                        move || {
                            // Owner dropped its registry; nothing left to notify
                            if deferred.send(name).is_err() {
                                trace!("Deferred notify queue closed");
                            }
                        },
                        delay,
                    );
                }
            },
        }
    }

    fn warn_if_sealed(&self, what: &str) {
        if self.is_sealed() {
            warn!(
                "Property '{}' is sealed; {what} change will not appear in its record",
                self.name
            );
        }
    }

    pub(crate) fn set_getter(&mut self, getter: Getter) { self.getter = Some(getter); }

    pub(crate) fn set_setter(&mut self, setter: Setter, notify: NotifyPolicy) {
        self.setter = Some(setter);
        self.notify = notify;
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = Some(visibility);
    }

    pub(crate) fn set_hint(&mut self, hint: PropertyHint, hint_string: String) {
        self.warn_if_sealed("hint");
        self.hint = hint;
        self.hint_string = hint_string;
    }

    pub(crate) fn add_usage(&mut self, flags: PropertyUsageFlags) {
        self.warn_if_sealed("usage");
        self.usage |= flags;
    }

    pub(crate) fn remove_usage(&mut self, flags: PropertyUsageFlags) {
        self.warn_if_sealed("usage");
        self.usage &= !flags;
    }
}

impl fmt::Debug for ExportProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportProperty")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .field("hint", &self.hint)
            .field("hint_string", &self.hint_string)
            .field("usage", &self.usage)
            .field("conditional", &self.visibility.is_some())
            .field("notify", &self.notify)
            .field("sealed", &self.is_sealed())
            .finish_non_exhaustive()
    }
}
