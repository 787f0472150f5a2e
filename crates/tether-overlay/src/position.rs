#![forbid(unsafe_code)]

//! Connection positions: where an overlay attaches to its origin.
//!
//! A [`ConnectionPositionPair`] names one anchor on the origin and one on
//! the overlay; the engine places the overlay so that the two coincide
//! (after offsets). A strategy holds an ordered list of pairs and tries
//! them front to back.
//!
//! ```text
//!   origin: (start, bottom)          overlay: (start, top)
//!   ┌────────────┐
//!   │  trigger   │
//!   ●────────────┘  ◄── anchors coincide
//!   ┌───────────────────┐
//!   │  menu panel       │
//!   └───────────────────┘
//! ```
//!
//! Enum values are always valid once constructed; validation happens when
//! parsing text (`parse`, or deserializing with the `serde` feature).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tether_core::Size;

use crate::error::PositionError;
use crate::scroll_clip::ScrollingVisibility;

/// Horizontal anchor, relative to text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalConnectionPos {
    Start,
    Center,
    End,
}

impl HorizontalConnectionPos {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }

    /// Parse `value` for the field named `field` (used in the error).
    pub fn parse(field: &'static str, value: &str) -> Result<Self, PositionError> {
        match value {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            _ => Err(PositionError::InvalidPosition {
                field,
                value: value.to_string(),
            }),
        }
    }
}

/// Vertical anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalConnectionPos {
    Top,
    Center,
    Bottom,
}

impl VerticalConnectionPos {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    /// Parse `value` for the field named `field` (used in the error).
    pub fn parse(field: &'static str, value: &str) -> Result<Self, PositionError> {
        match value {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => Err(PositionError::InvalidPosition {
                field,
                value: value.to_string(),
            }),
        }
    }
}

/// Anchor point on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OriginConnectionPosition {
    pub origin_x: HorizontalConnectionPos,
    pub origin_y: VerticalConnectionPos,
}

impl OriginConnectionPosition {
    #[inline]
    #[must_use]
    pub const fn new(origin_x: HorizontalConnectionPos, origin_y: VerticalConnectionPos) -> Self {
        Self { origin_x, origin_y }
    }
}

/// Anchor point on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayConnectionPosition {
    pub overlay_x: HorizontalConnectionPos,
    pub overlay_y: VerticalConnectionPos,
}

impl OverlayConnectionPosition {
    #[inline]
    #[must_use]
    pub const fn new(overlay_x: HorizontalConnectionPos, overlay_y: VerticalConnectionPos) -> Self {
        Self {
            overlay_x,
            overlay_y,
        }
    }
}

/// One candidate alignment between origin and overlay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawConnectionPositionPair", into = "RawConnectionPositionPair")
)]
pub struct ConnectionPositionPair {
    pub origin: OriginConnectionPosition,
    pub overlay: OverlayConnectionPosition,
    /// Horizontal offset, overriding the strategy default when set.
    pub offset_x: Option<f64>,
    /// Vertical offset, overriding the strategy default when set.
    pub offset_y: Option<f64>,
    /// Tie-break bias for the largest-visible-area fallback. Defaults to 1.
    pub weight: Option<f64>,
    /// Classes added to the pane while this pair is applied.
    pub panel_class: SmallVec<[String; 2]>,
}

impl ConnectionPositionPair {
    #[must_use]
    pub fn new(origin: OriginConnectionPosition, overlay: OverlayConnectionPosition) -> Self {
        Self {
            origin,
            overlay,
            offset_x: None,
            offset_y: None,
            weight: None,
            panel_class: SmallVec::new(),
        }
    }

    /// Build a pair from the four wire values, validating each.
    ///
    /// ```
    /// use tether_overlay::ConnectionPositionPair;
    ///
    /// let below = ConnectionPositionPair::parse("start", "bottom", "start", "top").unwrap();
    /// assert_eq!(below.origin.origin_y.as_str(), "bottom");
    ///
    /// let err = ConnectionPositionPair::parse("left", "bottom", "start", "top").unwrap_err();
    /// assert!(err.to_string().contains("originX"));
    /// ```
    pub fn parse(
        origin_x: &str,
        origin_y: &str,
        overlay_x: &str,
        overlay_y: &str,
    ) -> Result<Self, PositionError> {
        Ok(Self::new(
            OriginConnectionPosition::new(
                HorizontalConnectionPos::parse("originX", origin_x)?,
                VerticalConnectionPos::parse("originY", origin_y)?,
            ),
            OverlayConnectionPosition::new(
                HorizontalConnectionPos::parse("overlayX", overlay_x)?,
                VerticalConnectionPos::parse("overlayY", overlay_y)?,
            ),
        ))
    }

    #[must_use]
    pub fn with_offset_x(mut self, offset: f64) -> Self {
        self.offset_x = Some(offset);
        self
    }

    #[must_use]
    pub fn with_offset_y(mut self, offset: f64) -> Self {
        self.offset_y = Some(offset);
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_panel_class(mut self, class: impl Into<String>) -> Self {
        self.panel_class.push(class.into());
        self
    }

    /// Weight used for tie-breaking.
    #[inline]
    pub fn effective_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// Emitted after every successful apply.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConnectedOverlayPositionChange {
    /// The pair that was applied.
    pub connection_pair: ConnectionPositionPair,
    /// Clipping of origin and overlay by the registered scroll containers.
    pub scrollable_view_properties: ScrollingVisibility,
    /// Overlay size after flexible constraints. `None` for exact placement
    /// and for flexible placements that did not have to shrink.
    pub applied_size: Option<Size>,
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PanelClassInput {
    One(String),
    Many(Vec<String>),
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnectionPositionPair {
    origin_x: String,
    origin_y: String,
    overlay_x: String,
    overlay_y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    panel_class: Option<PanelClassInput>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConnectionPositionPair> for ConnectionPositionPair {
    type Error = PositionError;

    fn try_from(raw: RawConnectionPositionPair) -> Result<Self, Self::Error> {
        let mut pair = Self::parse(&raw.origin_x, &raw.origin_y, &raw.overlay_x, &raw.overlay_y)?;
        pair.offset_x = raw.offset_x;
        pair.offset_y = raw.offset_y;
        pair.weight = raw.weight;
        pair.panel_class = match raw.panel_class {
            None => SmallVec::new(),
            Some(PanelClassInput::One(class)) => class.split_whitespace().map(String::from).collect(),
            Some(PanelClassInput::Many(classes)) => classes.into_iter().collect(),
        };
        Ok(pair)
    }
}

#[cfg(feature = "serde")]
impl From<ConnectionPositionPair> for RawConnectionPositionPair {
    fn from(pair: ConnectionPositionPair) -> Self {
        Self {
            origin_x: pair.origin.origin_x.as_str().to_string(),
            origin_y: pair.origin.origin_y.as_str().to_string(),
            overlay_x: pair.overlay.overlay_x.as_str().to_string(),
            overlay_y: pair.overlay.overlay_y.as_str().to_string(),
            offset_x: pair.offset_x,
            offset_y: pair.offset_y,
            weight: pair.weight,
            panel_class: (!pair.panel_class.is_empty())
                .then(|| PanelClassInput::Many(pair.panel_class.into_vec())),
        }
    }
}
