//! Declarative, engine-neutral style model.
//!
//! A style is a list of rules; each rule pairs one symbolizer with an
//! optional attribute filter.
//!
//! Symbolizer kinds:
//! - `Circle`: point marker with fill and optional stroke
//! - `Line`: polyline with colour, opacity, width
//! - `Fill`: polygon fill with optional outline colour
//! - `Text`: label drawn from a feature attribute
//! - `Icon`: image marker (modelled, not written natively)

pub mod filter;
pub mod types;

pub use filter::{CombinationOperator, ComparisonOperator, Filter};
pub use types::{
    CircleSymbolizer, FillSymbolizer, IconSymbolizer, LineSymbolizer, Rule, Style, StyleType,
    Symbolizer, SymbolizerKind, TextSymbolizer,
};
