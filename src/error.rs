//! Setup errors.
//!
//! Cache lookups never fail; a missing or stale entry falls back to
//! self-sizing. The only hard failures are misconfigurations caught when
//! automatic caching is switched on.

use crate::dimension::Size;

/// Reasons automatic dimension caching could not be enabled.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SetupError {
    /// No [`CacheKeyProvider`](crate::CacheKeyProvider) has been registered.
    #[error("caching dimensions by key requires a cache key provider")]
    MissingKeyProvider,

    /// The container sizes items from a precomputed table instead of
    /// measuring them.
    #[error("caching dimensions by key requires self-sizing items")]
    SelfSizingDisabled,

    /// A component of the estimated item size that the container measures
    /// is zero, negative or not finite.
    #[error("estimated item size must be finite and positive, got {0:?}")]
    InvalidEstimatedSize(Size),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_setup_error_messages() {
        assert_eq!(
            SetupError::MissingKeyProvider.to_string(),
            "caching dimensions by key requires a cache key provider"
        );
        assert_eq!(
            SetupError::InvalidEstimatedSize(Size::new(0.0, 44.0)).to_string(),
            "estimated item size must be finite and positive, got 0x44"
        );
    }
}
