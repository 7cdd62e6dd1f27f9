//! Translator configuration.

use serde::{Deserialize, Serialize};

/// Defaults applied when a symbolizer leaves a field unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Circle radius used when the symbolizer has none, or the native radius is not finite.
    pub default_radius: f64,
    /// Font size in pixels when a text symbolizer has no `size`.
    pub default_font_size: f64,
    /// Font family when a text symbolizer has no `font`.
    pub default_font_family: String,
    /// Label offset in pixels when a text symbolizer has no `offset`.
    pub default_text_offset: [f64; 2],
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_radius: 5.0,
            default_font_size: 10.0,
            default_font_family: "sans-serif".to_string(),
            default_text_offset: [0.0, 0.0],
        }
    }
}

impl ParserOptions {
    /// Override the default circle radius.
    pub fn with_default_radius(mut self, radius: f64) -> Self {
        self.default_radius = radius;
        self
    }

    /// Override the default font size and family.
    pub fn with_default_font(mut self, size: f64, family: impl Into<String>) -> Self {
        self.default_font_size = size;
        self.default_font_family = family.into();
        self
    }

    /// Override the default label offset.
    pub fn with_default_text_offset(mut self, offset: [f64; 2]) -> Self {
        self.default_text_offset = offset;
        self
    }
}
