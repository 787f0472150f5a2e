#![forbid(unsafe_code)]

//! Declarative strategy configuration.
//!
//! [`PositionOptions`] mirrors the builder surface of
//! [`FlexibleConnectedPositionStrategy`](crate::FlexibleConnectedPositionStrategy)
//! as plain data, so a component can keep its overlay settings in a config
//! file or pass them across a boundary. With the `serde` feature it reads
//! the camelCase shape:
//!
//! ```json
//! {
//!   "direction": "rtl",
//!   "push": false,
//!   "viewportMargin": 8,
//!   "positions": [
//!     { "originX": "start", "originY": "bottom", "overlayX": "start", "overlayY": "top" }
//!   ]
//! }
//! ```
//!
//! Missing fields take the strategy defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tether_core::Direction;

use crate::position::ConnectionPositionPair;

/// Every configurable knob of a flexible connected strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PositionOptions {
    pub direction: Direction,
    pub push: bool,
    pub flexible_dimensions: bool,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub viewport_margin: f64,
    pub locked_position: bool,
    pub grow_after_open: bool,
    pub default_offset_x: f64,
    pub default_offset_y: f64,
    pub transform_origin_selector: Option<String>,
    /// Candidates in priority order. Empty keeps the strategy's list.
    pub positions: Vec<ConnectionPositionPair>,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            push: true,
            flexible_dimensions: true,
            min_width: None,
            min_height: None,
            viewport_margin: 0.0,
            locked_position: false,
            grow_after_open: false,
            default_offset_x: 0.0,
            default_offset_y: 0.0,
            transform_origin_selector: None,
            positions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_strategy_defaults() {
        let o = PositionOptions::default();
        assert!(o.push);
        assert!(o.flexible_dimensions);
        assert!(!o.locked_position);
        assert_eq!(o.viewport_margin, 0.0);
        assert!(o.positions.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_camel_case_with_defaults() {
        let json = r#"{
            "direction": "rtl",
            "push": false,
            "viewportMargin": 8,
            "minHeight": 120,
            "transformOriginSelector": ".menu",
            "positions": [
                { "originX": "start", "originY": "bottom", "overlayX": "start", "overlayY": "top" }
            ]
        }"#;
        let o: PositionOptions = serde_json::from_str(json).unwrap();
        assert_eq!(o.direction, Direction::Rtl);
        assert!(!o.push);
        assert!(o.flexible_dimensions);
        assert_eq!(o.viewport_margin, 8.0);
        assert_eq!(o.min_height, Some(120.0));
        assert_eq!(o.transform_origin_selector.as_deref(), Some(".menu"));
        assert_eq!(o.positions.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn invalid_pair_fails_to_parse() {
        let json = r#"{ "positions": [
            { "originX": "left", "originY": "bottom", "overlayX": "start", "overlayY": "top" }
        ] }"#;
        let err = serde_json::from_str::<PositionOptions>(json).unwrap_err();
        assert!(err.to_string().contains("originX"));
    }
}
