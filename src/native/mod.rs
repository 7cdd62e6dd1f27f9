//! Native (engine-side) style model.
//!
//! Mirrors the OpenLayers style object graph: a style holds optional image
//! (circle), fill, stroke and text layers. Written rules become either a
//! static style or a style function evaluated per feature.

pub mod color;
pub mod entry;
pub mod feature;
pub mod types;

pub use color::{ColorValue, Rgba};
pub use entry::{NativeStyleEntry, StyleFn, StyleFunction};
pub use feature::{AttributeSource, Feature};
pub use types::{CircleStyle, FillStyle, NativeStyle, StrokeStyle, TextStyle};
