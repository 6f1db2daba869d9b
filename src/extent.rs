//! Layout Extents and Container Geometry
//!
//! Measured dimensions depend on the space an item is laid out in. For a
//! vertically scrolling list that is the usable width; for a horizontally
//! scrolling grid, the usable height. This module turns container bounds and
//! insets into that single number, and wraps it in a hashable key for the
//! [`CacheRegistry`](crate::CacheRegistry).

use crate::dimension::Size;
use core::fmt;
use core::hash::{Hash, Hasher};

/// The direction a container scrolls in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Items stack top to bottom; the width constrains their height.
    #[default]
    Vertical,
    /// Items stack left to right; the height constrains their width.
    Horizontal,
}

/// Content insets of a scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Insets = Insets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Creates insets from each edge.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Returns the space available to items along the axis that constrains them.
///
/// Vertical containers subtract the left and right insets from the width;
/// horizontal containers subtract the top and bottom insets from the height.
/// The result may be zero or negative for a container that is not sized yet.
pub fn usable_extent(bounds: Size, insets: Insets, axis: ScrollAxis) -> f64 {
    match axis {
        ScrollAxis::Vertical => bounds.width - insets.left - insets.right,
        ScrollAxis::Horizontal => bounds.height - insets.top - insets.bottom,
    }
}

/// A positive, finite layout extent usable as a map key.
///
/// Equality and hashing use the bit pattern of the value. Construction
/// rejects zero, negative, NaN and infinite extents, which keeps `-0.0` and
/// NaN payloads out of the key space.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LayoutExtent(u64);

impl LayoutExtent {
    /// Wraps `extent` if it can partition a cache, or returns `None` for a
    /// degenerate layout.
    #[inline]
    pub fn new(extent: f64) -> Option<Self> {
        if extent.is_finite() && extent > 0.0 {
            Some(Self(extent.to_bits()))
        } else {
            None
        }
    }

    /// The wrapped extent.
    #[inline]
    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl Hash for LayoutExtent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for LayoutExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LayoutExtent").field(&self.get()).finish()
    }
}

impl fmt::Display for LayoutExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
