//! The typed payload flowing along graph links.
//!
//! An [`OpResult`] is either a pixel buffer over a rectangular domain or a
//! single broadcastable value: one element logically repeated across the
//! whole domain. Single values let downstream operations process constant
//! inputs in O(1) instead of once per pixel.
//!
//! # Storage
//!
//! Buffers store interleaved `f32` elements with a stride of
//! [`DataKind::channels()`]. Single values are stored padded to four lanes
//! regardless of kind, so only lane 0 is meaningful for
//! [`DataKind::Scalar`].
//!
//! # Invariants
//!
//! A result's kind never changes in place. Producing a different kind always
//! means allocating a new result; consumers read results immutably.

use crate::error::{Error, Result};
use crate::kind::DataKind;
use crate::rect::Rect;

/// Backing storage for a result.
#[derive(Debug, Clone, PartialEq)]
enum Storage {
    /// One value broadcast over the whole domain, padded to four lanes.
    Single([f32; 4]),
    /// Interleaved per-pixel elements, `kind.channels()` floats each.
    Buffer(Vec<f32>),
}

/// A typed pixel buffer or single broadcastable value.
///
/// # Example
///
/// ```rust
/// use comp_core::{DataKind, OpResult, Rect};
///
/// let gray = OpResult::single(DataKind::Scalar, [0.5, 0.0, 0.0, 0.0]);
/// assert!(gray.is_single_value());
///
/// let mut buf = OpResult::allocate(DataKind::Color4, Rect::of_size(2, 2))?;
/// buf.store_pixel(1, 1, [1.0, 0.5, 0.25, 1.0])?;
/// assert_eq!(buf.load_pixel(1, 1)?, [1.0, 0.5, 0.25, 1.0]);
/// # Ok::<(), comp_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OpResult {
    kind: DataKind,
    domain: Rect,
    storage: Storage,
}

impl OpResult {
    /// Creates a single-value result of the given kind.
    ///
    /// Unused lanes of `value` are ignored; only the first
    /// `kind.channels()` lanes are meaningful.
    pub fn single(kind: DataKind, value: [f32; 4]) -> Self {
        Self {
            kind,
            domain: Rect::of_size(1, 1),
            storage: Storage::Single(value),
        }
    }

    /// Allocates a zeroed buffer result of the given kind over `domain`.
    pub fn allocate(kind: DataKind, domain: Rect) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::InvalidDomain {
                width: domain.width,
                height: domain.height,
            });
        }
        let len = domain.area() * kind.channels();
        Ok(Self {
            kind,
            domain,
            storage: Storage::Buffer(vec![0.0; len]),
        })
    }

    /// Wraps an existing interleaved buffer, validating its length against
    /// the domain and kind.
    pub fn from_f32(data: Vec<f32>, kind: DataKind, domain: Rect) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::InvalidDomain {
                width: domain.width,
                height: domain.height,
            });
        }
        let expected = domain.area() * kind.channels();
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            kind,
            domain,
            storage: Storage::Buffer(data),
        })
    }

    /// The data kind of this result.
    #[inline]
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// The pixel domain this result is defined over.
    #[inline]
    pub fn domain(&self) -> Rect {
        self.domain
    }

    /// Floats stored per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.kind.channels()
    }

    /// Number of pixels covered by the domain.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.domain.area()
    }

    /// Whether this result is a single broadcastable value.
    #[inline]
    pub fn is_single_value(&self) -> bool {
        matches!(self.storage, Storage::Single(_))
    }

    /// The broadcast value, padded to four lanes, if this is a single-value
    /// result.
    #[inline]
    pub fn single_value(&self) -> Option<[f32; 4]> {
        match self.storage {
            Storage::Single(value) => Some(value),
            Storage::Buffer(_) => None,
        }
    }

    /// The raw interleaved storage.
    ///
    /// For single-value results this is the meaningful prefix of the padded
    /// value, `channels()` floats long.
    pub fn data(&self) -> &[f32] {
        match &self.storage {
            Storage::Single(value) => &value[..self.kind.channels()],
            Storage::Buffer(data) => data,
        }
    }

    /// Mutable access to buffer storage. `None` for single-value results.
    pub fn data_mut(&mut self) -> Option<&mut [f32]> {
        match &mut self.storage {
            Storage::Single(_) => None,
            Storage::Buffer(data) => Some(data),
        }
    }

    /// Reads the element at local pixel (x, y), padded to four lanes with
    /// zeros. Single-value results broadcast their value to every pixel.
    pub fn load_pixel(&self, x: u32, y: u32) -> Result<[f32; 4]> {
        self.check_bounds(x, y)?;
        match &self.storage {
            Storage::Single(value) => {
                let mut out = [0.0; 4];
                out[..self.channels()].copy_from_slice(&value[..self.channels()]);
                Ok(out)
            }
            Storage::Buffer(data) => {
                let c = self.channels();
                let base = ((y as usize) * (self.domain.width as usize) + x as usize) * c;
                let mut out = [0.0; 4];
                out[..c].copy_from_slice(&data[base..base + c]);
                Ok(out)
            }
        }
    }

    /// Writes the first `channels()` lanes of `value` to local pixel (x, y).
    ///
    /// Fails for single-value results, which are immutable once constructed.
    pub fn store_pixel(&mut self, x: u32, y: u32, value: [f32; 4]) -> Result<()> {
        self.check_bounds(x, y)?;
        let c = self.channels();
        let width = self.domain.width as usize;
        match &mut self.storage {
            Storage::Single(_) => Err(Error::OutOfBounds {
                x,
                y,
                width: 1,
                height: 1,
            }),
            Storage::Buffer(data) => {
                let base = ((y as usize) * width + x as usize) * c;
                data[base..base + c].copy_from_slice(&value[..c]);
                Ok(())
            }
        }
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if self.is_single_value() {
            return Ok(());
        }
        if x >= self.domain.width || y >= self.domain.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.domain.width,
                height: self.domain.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_roundtrip() {
        let result = OpResult::single(DataKind::Vector4, [1.0, 2.0, 3.0, 4.0]);
        assert!(result.is_single_value());
        assert_eq!(result.single_value(), Some([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(result.kind(), DataKind::Vector4);
    }

    #[test]
    fn test_single_value_broadcasts_to_every_pixel() {
        let result = OpResult::single(DataKind::Scalar, [0.25, 0.0, 0.0, 0.0]);
        assert_eq!(result.load_pixel(0, 0).unwrap(), [0.25, 0.0, 0.0, 0.0]);
        assert_eq!(result.data(), &[0.25]);
    }

    #[test]
    fn test_allocate_zeroed() {
        let result = OpResult::allocate(DataKind::Color4, Rect::of_size(3, 2)).unwrap();
        assert!(!result.is_single_value());
        assert_eq!(result.data().len(), 3 * 2 * 4);
        assert!(result.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_allocate_rejects_empty_domain() {
        assert!(OpResult::allocate(DataKind::Scalar, Rect::of_size(0, 4)).is_err());
    }

    #[test]
    fn test_from_f32_validates_length() {
        let err = OpResult::from_f32(vec![0.0; 5], DataKind::Scalar, Rect::of_size(2, 2));
        assert!(err.is_err());

        let ok = OpResult::from_f32(vec![0.0; 4], DataKind::Scalar, Rect::of_size(2, 2));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_pixel_access() {
        let mut result = OpResult::allocate(DataKind::Scalar, Rect::of_size(2, 2)).unwrap();
        result.store_pixel(1, 0, [0.75, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(result.load_pixel(1, 0).unwrap()[0], 0.75);
        assert!(result.load_pixel(2, 0).is_err());
    }

    #[test]
    fn test_store_rejects_single_value() {
        let mut result = OpResult::single(DataKind::Scalar, [0.5, 0.0, 0.0, 0.0]);
        assert!(result.store_pixel(0, 0, [1.0; 4]).is_err());
    }
}
