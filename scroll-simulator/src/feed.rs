//! Simulated feed content and self-sizing measurement
//!
//! Each item is a post whose only property that matters for layout is the
//! length of its text. Measuring wraps the text at the usable width:
//!
//! ```text
//! height = ceil(length * GLYPH_WIDTH / extent) * LINE_HEIGHT + PADDING
//! ```
//!
//! The feed counts every measurement so strategies can be compared by how
//! much layout work they avoided.

use dimension_cache::IndexPath;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Width of one glyph in points
pub const GLYPH_WIDTH: f64 = 16.0;
/// Height of one wrapped line in points
pub const LINE_HEIGHT: f64 = 20.0;
/// Vertical padding around the text (avatar row, margins)
pub const PADDING: f64 = 24.0;

/// A list of posts with an instrumented measurement pass
#[derive(Debug)]
pub struct Feed {
    lengths: Rc<RefCell<Vec<usize>>>,
    measurements: Cell<u64>,
}

impl Feed {
    /// Create a feed of `items` posts with deterministic lengths between 10
    /// and 139 characters
    pub fn new(items: usize) -> Self {
        let lengths = (0..items).map(|i| 10 + (i * 37) % 130).collect();
        Self::with_lengths(lengths)
    }

    /// Create a feed from explicit content lengths
    pub fn with_lengths(lengths: Vec<usize>) -> Self {
        Self {
            lengths: Rc::new(RefCell::new(lengths)),
            measurements: Cell::new(0),
        }
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.lengths.borrow().len()
    }

    /// Returns `true` if the feed has no posts
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content length of a post
    pub fn length(&self, item: usize) -> Option<usize> {
        self.lengths.borrow().get(item).copied()
    }

    /// Replace the content of a post; returns `false` if it does not exist
    pub fn edit(&self, item: usize, length: usize) -> bool {
        match self.lengths.borrow_mut().get_mut(item) {
            Some(slot) => {
                *slot = length;
                true
            }
            None => false,
        }
    }

    /// Run the self-sizing measurement for a post at the given usable width
    pub fn measure(&self, item: usize, extent: f64) -> f64 {
        self.measurements.set(self.measurements.get() + 1);
        let length = self.length(item).unwrap_or(0) as f64;
        let per_line = (extent / GLYPH_WIDTH).floor().max(1.0);
        (length / per_line).ceil() * LINE_HEIGHT + PADDING
    }

    /// Number of measurements run so far
    pub fn measurements(&self) -> u64 {
        self.measurements.get()
    }

    /// Key provider for the container: a post is keyed by its content length
    pub fn key_provider(&self) -> impl Fn(IndexPath) -> usize + 'static {
        let lengths = Rc::clone(&self.lengths);
        move |position: IndexPath| lengths.borrow().get(position.item).copied().unwrap_or(0)
    }
}
