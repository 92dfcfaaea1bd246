//! The closed set of pixel data kinds carried by graph links.
//!
//! Every link payload is tagged with a [`DataKind`]. The set is closed by
//! design: the conversion layer in `comp-graph` enumerates all ordered pairs
//! of unequal kinds, so adding a kind here means adding conversion rules
//! there.

use std::fmt;

/// Tag distinguishing the pixel data kinds a result can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// A single float per pixel.
    Scalar,
    /// Four float components per pixel (x, y, z, w).
    Vector4,
    /// Four float channels per pixel (r, g, b, a).
    Color4,
}

impl DataKind {
    /// All kinds, in declaration order.
    pub const ALL: [DataKind; 3] = [DataKind::Scalar, DataKind::Vector4, DataKind::Color4];

    /// Number of floats stored per pixel for this kind.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector4 | Self::Color4 => 4,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector4 => "vector4",
            Self::Color4 => "color4",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
