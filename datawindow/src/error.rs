use thiserror::Error;

/// Configuration rejected at construction time.
///
/// Out-of-range *inputs* (page numbers, scroll offsets) are clamped and never reported; only
/// parameters that would leave a component without a meaningful contract end up here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("item height must be at least 1")]
    ZeroItemHeight,
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
    /// Sampling needs room for both endpoints.
    #[error("max points must be at least 2, got {0}")]
    TooFewPoints(usize),
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
}
