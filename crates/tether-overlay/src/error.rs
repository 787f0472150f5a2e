#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Every variant is a programming mistake in how positions were declared or
//! wired. Geometry never produces an error: when nothing fits, the engine
//! falls back instead.

/// Errors from configuring or attaching a position strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A connection position field had a value outside its enum.
    InvalidPosition {
        /// Wire name of the field (`originX`, `overlayY`, ...).
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A candidate list was empty.
    NoPositions,
    /// The strategy is already attached to a different overlay.
    AlreadyAttached,
}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPosition { field, value } => {
                let expected = match *field {
                    "originX" | "overlayX" => "\"start\", \"end\", or \"center\"",
                    _ => "\"top\", \"bottom\", or \"center\"",
                };
                write!(f, "invalid {field} \"{value}\": expected {expected}")
            }
            Self::NoPositions => write!(f, "at least one connection position is required"),
            Self::AlreadyAttached => {
                write!(f, "position strategy is already attached to an overlay")
            }
        }
    }
}

impl std::error::Error for PositionError {}
