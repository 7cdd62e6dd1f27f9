//! Translation between declarative styles and native styles.
//!
//! Write path: every rule's symbolizer is converted; a rule with a filter is
//! wrapped in a style function that compiles the filter once and returns the
//! rule's style only for matching features. Read path: the native style is
//! classified and read back as a single-rule style.

pub mod classify;
pub mod converters;
pub mod expressions;

use futures::future::{ready, Ready};

use crate::config::ParserOptions;
use crate::error::StyleResult;
use crate::native::{NativeStyle, NativeStyleEntry, StyleFunction};
use crate::style::{Rule, Style};

pub use classify::classify;
pub use converters::{read_symbolizer, symbolizer_to_native, try_symbolizer_to_native};
pub use expressions::{compile_filter, compile_filter_value, CompiledFilter};

/// Reads and writes one native style format.
///
/// Both operations complete synchronously; the returned futures are already
/// resolved and exist so callers can compose parsers without blocking.
pub trait StyleParser {
    /// Native style accepted by `read_style`.
    type Native;
    /// Output of `write_style`.
    type Written;

    fn read_style(&self, native: &Self::Native) -> Ready<StyleResult<Style>>;

    fn write_style(&self, style: &Style) -> Ready<StyleResult<Self::Written>>;
}

/// Parser for OpenLayers-style native styles.
#[derive(Debug, Clone, Default)]
pub struct OlStyleParser {
    options: ParserOptions,
}

impl OlStyleParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Read a native style as a single-rule declarative style.
    pub fn read(&self, native: &NativeStyle) -> StyleResult<Style> {
        let style_type = classify(native)?;
        let kind = converters::kind_for_style_type(style_type);
        let symbolizer = read_symbolizer(kind, native, &self.options)?;
        Ok(Style::new(style_type, vec![Rule::new(symbolizer)]))
    }

    /// Write every rule, preserving rule order.
    pub fn write(&self, style: &Style) -> StyleResult<Vec<NativeStyleEntry>> {
        if style.rules.is_empty() {
            log::debug!("writing {} style with no rules", style.style_type);
        }
        style.rules.iter().map(|rule| self.write_rule(rule)).collect()
    }

    /// Write one rule: static when unfiltered, a style selector otherwise.
    pub fn write_rule(&self, rule: &Rule) -> StyleResult<NativeStyleEntry> {
        let entry = symbolizer_to_native(&rule.symbolizer, &self.options);
        match &rule.filter {
            None => Ok(entry),
            Some(filter) => Ok(style_selector(compile_filter(filter)?, entry)),
        }
    }
}

impl StyleParser for OlStyleParser {
    type Native = NativeStyle;
    type Written = Vec<NativeStyleEntry>;

    fn read_style(&self, native: &NativeStyle) -> Ready<StyleResult<Style>> {
        ready(self.read(native))
    }

    fn write_style(&self, style: &Style) -> Ready<StyleResult<Vec<NativeStyleEntry>>> {
        ready(self.write(style))
    }
}

/// Gate an entry behind a compiled predicate.
///
/// Non-matching features get `None`: the rule does not apply to them.
pub fn style_selector(predicate: CompiledFilter, entry: NativeStyleEntry) -> NativeStyleEntry {
    NativeStyleEntry::Function(StyleFunction::new(move |feature, resolution| {
        if predicate.matches(feature) {
            entry.resolve(feature, resolution)
        } else {
            None
        }
    }))
}
