#![forbid(unsafe_code)]

//! Layout direction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text direction of the overlay's context. `start`/`end` anchors resolve to
/// left/right under [`Direction::Ltr`] and to right/left under
/// [`Direction::Rtl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[inline]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Lowercase name as used by the `dir` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
