//! Rectangular pixel domains.
//!
//! A result is defined over a [`Rect`]: the rectangular extent of pixels it
//! covers. Coordinates use the standard image convention with (0, 0) at the
//! top-left corner, X increasing to the right and Y increasing downward.

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Invariants
///
/// A rectangle with zero width or height is considered empty; operations over
/// pixel domains reject empty rectangles.
///
/// # Example
///
/// ```rust
/// use comp_core::Rect;
///
/// let rect = Rect::of_size(100, 50);
/// assert_eq!(rect.area(), 5000);
/// assert!(rect.contains(99, 49));
/// assert!(!rect.contains(100, 49));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive).
    pub x: u32,
    /// Y coordinate of the top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given dimensions.
    #[inline]
    pub const fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Total pixel count.
    #[inline]
    pub const fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the point (px, py), in the rectangle's own coordinate space,
    /// lies inside it.
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && px < self.x + self.width
            && py < self.y + self.height
    }

    /// Whether two rectangles cover the same extent.
    #[inline]
    pub fn same_extent(&self, other: &Rect) -> bool {
        self.width == other.width && self.height == other.height
    }
}
