//! Bidirectional translation between declarative map styles and
//! OpenLayers-style native styles.
//!
//! ```
//! use olstyle::{Filter, LineSymbolizer, OlStyleParser, Rule, Style, StyleType};
//!
//! let style = Style::new(
//!     StyleType::Line,
//!     vec![Rule::new(LineSymbolizer {
//!         color: Some("#ff0000".into()),
//!         opacity: Some(0.5),
//!         width: Some(2.0),
//!     })
//!     .with_filter(Filter::eq("class", "motorway"))],
//! );
//! let entries = OlStyleParser::new().write(&style).unwrap();
//! assert!(entries[0].is_dynamic());
//! ```

pub mod config;
pub mod error;
pub mod native;
pub mod parser;
pub mod style;

pub use config::ParserOptions;
pub use error::{StyleError, StyleResult};
pub use native::{
    AttributeSource, CircleStyle, ColorValue, Feature, FillStyle, NativeStyle, NativeStyleEntry,
    Rgba, StrokeStyle, StyleFunction, TextStyle,
};
pub use parser::{
    classify, compile_filter, compile_filter_value, style_selector, CompiledFilter, OlStyleParser,
    StyleParser,
};
pub use style::{
    CircleSymbolizer, CombinationOperator, ComparisonOperator, FillSymbolizer, Filter,
    IconSymbolizer, LineSymbolizer, Rule, Style, StyleType, Symbolizer, SymbolizerKind,
    TextSymbolizer,
};
