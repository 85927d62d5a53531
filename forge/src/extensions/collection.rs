//! Element type hints for arrays and dictionaries
//!
//! Both collections report their element types through the `ARRAY_TYPE` hint;
//! dictionaries pass `"Key,Value"`.

use crate::builder::PropertyBuilder;
use crate::hint::PropertyHint;
use crate::variant::{Dictionary, ExportValue, ValueKind, VariantArray};

/// Host name for `T`: the tag name when `T` is registrable, else the bare Rust type name
fn element_name<T: ExportValue>() -> String {
    ValueKind::of::<T>().map_or_else(
        |_| {
            let full = std::any::type_name::<T>();
            let path = full.split('<').next().unwrap_or(full);
            path.rsplit("::").next().unwrap_or(path).to_string()
        },
        |kind| kind.hint_name().to_string(),
    )
}

impl PropertyBuilder<'_, VariantArray> {
    /// Element type taken from `T`
    pub fn array_type<T: ExportValue>(&mut self) -> &mut Self {
        self.array_type_named(&element_name::<T>())
    }

    /// Element type given by host name, e.g. `"int"`
    pub fn array_type_named(&mut self, element: &str) -> &mut Self {
        self.hint(PropertyHint::ArrayType, element)
    }
}

impl PropertyBuilder<'_, Dictionary> {
    /// Key and value types taken from `K` and `V`
    pub fn dictionary_type<K: ExportValue, V: ExportValue>(&mut self) -> &mut Self {
        self.dictionary_type_named(&element_name::<K>(), &element_name::<V>())
    }

    /// Key and value types given by host name
    pub fn dictionary_type_named(&mut self, key: &str, value: &str) -> &mut Self {
        self.hint(PropertyHint::ArrayType, format!("{key},{value}"))
    }
}
