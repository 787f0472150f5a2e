#![forbid(unsafe_code)]

//! Inline box-model style vocabulary.
//!
//! The engine never touches a DOM. It produces [`StyleDeclaration`]s, ordered
//! lists of `(property, value)` writes, and hands them to an
//! [`OverlayRef`](crate::overlay::OverlayRef) which applies them in order.
//!
//! An empty value clears the property (`element.style.top = ''`). Zero is a
//! real value and is always written as `"0px"` by [`px`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Properties the positioning engine writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StyleProperty {
    Position,
    Top,
    Bottom,
    Left,
    Right,
    Width,
    Height,
    MaxWidth,
    MaxHeight,
    Transform,
    AlignItems,
    JustifyContent,
}

impl StyleProperty {
    /// CSS property name.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Width => "width",
            Self::Height => "height",
            Self::MaxWidth => "max-width",
            Self::MaxHeight => "max-height",
            Self::Transform => "transform",
            Self::AlignItems => "align-items",
            Self::JustifyContent => "justify-content",
        }
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Ordered set of style writes.
///
/// Setting a property twice keeps its first slot and replaces the value, so
/// the declaration never holds duplicates and application order is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyleDeclaration {
    entries: SmallVec<[(StyleProperty, String); 8]>,
}

impl StyleDeclaration {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write. An empty `value` clears the property.
    pub fn set(&mut self, property: StyleProperty, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((property, value)),
        }
        self
    }

    /// Record a clear.
    pub fn clear(&mut self, property: StyleProperty) -> &mut Self {
        self.set(property, String::new())
    }

    /// Value recorded for `property`, if any. A cleared property yields `Some("")`.
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Merge `other` into `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: &StyleDeclaration) -> &mut Self {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format a pixel length. Zero (including negative zero) is `"0px"`.
pub fn px(value: f64) -> String {
    if value == 0.0 {
        return "0px".to_string();
    }
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_integers_without_fraction() {
        assert_eq!(px(380.0), "380px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-4.0), "-4px");
    }

    #[test]
    fn px_zero_is_explicit() {
        assert_eq!(px(0.0), "0px");
        assert_eq!(px(-0.0), "0px");
    }

    #[test]
    fn set_replaces_in_place() {
        let mut decl = StyleDeclaration::new();
        decl.clear(StyleProperty::Top)
            .clear(StyleProperty::Left)
            .set(StyleProperty::Top, "5px");
        let order: Vec<_> = decl.iter().collect();
        assert_eq!(
            order,
            vec![(StyleProperty::Top, "5px"), (StyleProperty::Left, "")]
        );
    }

    #[test]
    fn extend_overrides() {
        let mut base = StyleDeclaration::new();
        base.set(StyleProperty::Width, "10px");
        let mut patch = StyleDeclaration::new();
        patch.set(StyleProperty::Width, "100%").set(StyleProperty::Height, "100%");
        base.extend(&patch);
        assert_eq!(base.get(StyleProperty::Width), Some("100%"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn css_names() {
        assert_eq!(StyleProperty::MaxHeight.to_string(), "max-height");
        assert_eq!(StyleProperty::JustifyContent.css_name(), "justify-content");
    }
}
