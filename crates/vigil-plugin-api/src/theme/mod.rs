//! Colour palette produced by theme plugins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named set of colour slots for the dashboard.
///
/// Slots are free-form names the host understands (`background`, `accent`,
/// `warning`, ...); values are colour strings in any form the host renders,
/// conventionally `#rrggbb` hex.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::theme::ThemePalette;
///
/// let palette = ThemePalette::new("solar")
///     .with_color("background", "#fdf6e3")
///     .with_color("accent", "#268bd2");
/// assert_eq!(palette.color("accent"), Some("#268bd2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    name: String,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

impl ThemePalette {
    /// Creates an empty palette with a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: BTreeMap::new(),
        }
    }

    /// Assigns a colour to a slot, replacing any previous value.
    #[must_use]
    pub fn with_color(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(slot.into(), value.into());
        self
    }

    /// Returns the palette name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the colour assigned to a slot, if any.
    #[must_use]
    pub fn color(&self, slot: &str) -> Option<&str> {
        self.colors.get(slot).map(String::as_str)
    }

    /// Returns every slot assignment.
    #[must_use]
    pub const fn colors(&self) -> &BTreeMap<String, String> {
        &self.colors
    }
}

#[cfg(test)]
mod tests;
