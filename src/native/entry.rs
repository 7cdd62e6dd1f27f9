//! Written style entries: static styles and per-feature style functions.

use std::fmt;
use std::sync::Arc;

use super::feature::Feature;
use super::types::NativeStyle;

/// Signature of a per-feature style function: `(feature, resolution)`.
///
/// `None` means "this rule does not apply to this feature". Styles are
/// handed out behind an `Arc` so a fixed style is shared, not copied, on
/// every evaluation.
pub type StyleFn = dyn Fn(&Feature, f64) -> Option<Arc<NativeStyle>> + Send + Sync;

/// Shareable handle to a style function.
#[derive(Clone)]
pub struct StyleFunction(Arc<StyleFn>);

impl StyleFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Feature, f64) -> Option<Arc<NativeStyle>> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, feature: &Feature, resolution: f64) -> Option<Arc<NativeStyle>> {
        (self.0)(feature, resolution)
    }
}

impl fmt::Debug for StyleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StyleFunction(..)")
    }
}

/// One written rule, in input rule order.
#[derive(Debug, Clone)]
pub enum NativeStyleEntry {
    /// Applies to every feature.
    Static(Arc<NativeStyle>),
    /// Decided per feature and resolution.
    Function(StyleFunction),
}

impl NativeStyleEntry {
    /// Style this entry produces for a feature, if any.
    pub fn resolve(&self, feature: &Feature, resolution: f64) -> Option<Arc<NativeStyle>> {
        match self {
            NativeStyleEntry::Static(style) => Some(Arc::clone(style)),
            NativeStyleEntry::Function(func) => func.call(feature, resolution),
        }
    }

    pub fn as_static(&self) -> Option<&NativeStyle> {
        match self {
            NativeStyleEntry::Static(style) => Some(style.as_ref()),
            NativeStyleEntry::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&StyleFunction> {
        match self {
            NativeStyleEntry::Static(_) => None,
            NativeStyleEntry::Function(func) => Some(func),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, NativeStyleEntry::Function(_))
    }
}

impl From<NativeStyle> for NativeStyleEntry {
    fn from(style: NativeStyle) -> Self {
        NativeStyleEntry::Static(Arc::new(style))
    }
}

impl From<StyleFunction> for NativeStyleEntry {
    fn from(func: StyleFunction) -> Self {
        NativeStyleEntry::Function(func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::types::StrokeStyle;

    #[test]
    fn test_static_entry_resolves_for_any_feature() {
        let style = NativeStyle::default().with_stroke(StrokeStyle::new(None, Some(1.0)));
        let entry = NativeStyleEntry::from(style.clone());
        assert!(!entry.is_dynamic());
        assert_eq!(entry.resolve(&Feature::default(), 1.0), Some(Arc::new(style)));
    }

    #[test]
    fn test_static_entry_shares_its_style() {
        let entry = NativeStyleEntry::from(NativeStyle::engine_default());
        let first = entry.resolve(&Feature::default(), 1.0).unwrap();
        let second = entry.resolve(&Feature::default(), 2.0).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_function_entry_sees_resolution() {
        let entry = NativeStyleEntry::from(StyleFunction::new(|_, res| {
            (res < 10.0).then(|| Arc::new(NativeStyle::default()))
        }));
        assert!(entry.is_dynamic());
        assert!(entry.resolve(&Feature::default(), 1.0).is_some());
        assert!(entry.resolve(&Feature::default(), 20.0).is_none());
    }
}
