//! Measured Dimensions
//!
//! A dimension is the laid-out extent of one displayed item: a scalar height
//! for vertically scrolling lists, or a 2D [`Size`] for grids. Both shapes
//! share the [`Dimension`] trait so a single cache implementation serves
//! either.
//!
//! # The Zero Sentinel
//!
//! Every dimension type provides a zero value. Lookups that find nothing
//! return it, so callers that must tell a measured zero apart from an
//! unmeasured item check existence first.

use crate::extent::ScrollAxis;
use core::fmt;

/// A measured extent that can be stored in a [`KeyedDimensionCache`](crate::KeyedDimensionCache).
pub trait Dimension: Copy + PartialEq {
    /// The value returned for keys that have never been measured.
    fn zero() -> Self;

    /// Returns `true` if every component is finite and non-negative.
    ///
    /// The cache stores invalid values as given; this predicate only drives
    /// diagnostics.
    fn is_valid(&self) -> bool;

    /// The part of an estimated item size this dimension type measures.
    ///
    /// Scalars take the extent along the scroll axis; sizes take both.
    fn from_estimate(estimate: Size, axis: ScrollAxis) -> Self;

    /// Returns `true` if every component is finite and greater than zero.
    fn is_positive(&self) -> bool;
}

impl Dimension for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.is_finite() && *self >= 0.0
    }

    #[inline]
    fn from_estimate(estimate: Size, axis: ScrollAxis) -> Self {
        match axis {
            ScrollAxis::Vertical => estimate.height,
            ScrollAxis::Horizontal => estimate.width,
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.is_finite() && *self > 0.0
    }
}

impl Dimension for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.is_finite() && *self >= 0.0
    }

    #[inline]
    fn from_estimate(estimate: Size, axis: ScrollAxis) -> Self {
        f64::from_estimate(estimate, axis) as f32
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.is_finite() && *self > 0.0
    }
}

/// A two-dimensional size, as measured for grid items.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// The zero size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a size from its components.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Dimension for Size {
    #[inline]
    fn zero() -> Self {
        Size::ZERO
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.width.is_valid() && self.height.is_valid()
    }

    #[inline]
    fn from_estimate(estimate: Size, _axis: ScrollAxis) -> Self {
        estimate
    }

    #[inline]
    fn is_positive(&self) -> bool {
        Dimension::is_positive(&self.width) && Dimension::is_positive(&self.height)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
