//! Color and button widgets

use crate::builder::PropertyBuilder;
use crate::hint::PropertyHint;
use crate::variant::{Callable, Color};

impl PropertyBuilder<'_, Color> {
    /// Hide the alpha channel in the color picker
    pub fn no_alpha(&mut self) -> &mut Self { self.hint(PropertyHint::ColorNoAlpha, "") }
}

impl PropertyBuilder<'_, Callable> {
    /// Show the callable as a button labelled `label`, optionally with a theme icon
    pub fn tool_button(&mut self, label: &str, icon: Option<&str>) -> &mut Self {
        let hint_string = match icon {
            Some(icon) if !icon.is_empty() => format!("{label},{icon}"),
            _ => label.to_string(),
        };
        self.hint(PropertyHint::ToolButton, hint_string)
    }
}
