//! String editor variants

use crate::builder::PropertyBuilder;
use crate::hint::PropertyHint;

impl PropertyBuilder<'_, String> {
    /// Edit in a multi-line text box
    pub fn multiline(&mut self) -> &mut Self { self.hint(PropertyHint::MultilineText, "") }

    /// Mask the input
    pub fn password(&mut self) -> &mut Self { self.hint(PropertyHint::Password, "") }

    /// Show `text` while the field is empty
    pub fn placeholder(&mut self, text: impl Into<String>) -> &mut Self {
        self.hint(PropertyHint::PlaceholderText, text)
    }
}
