//! Crate-level error types.
//!
//! [`WavecountError`] unifies every failure an analysis run can hit
//! (retrieval, too little data, configuration, rendering, console I/O)
//! behind a single enum so the console can report any of them and carry on.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WavecountError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum WavecountError {
    /// The price-history request failed or returned a body we could not use.
    #[error("failed to fetch price history: {0}")]
    FetchFailure(String),

    /// The provider answered, but with an empty series, even after the
    /// search fallback.
    #[error("no price data found for '{asset}', check the asset name")]
    NoDataFound { asset: String },

    /// Fewer than two usable price points.
    #[error("insufficient data: need at least 2 price points, got {points}")]
    InsufficientData { points: usize },

    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The chart output directory could not be created.
    #[error("failed to create chart directory {}: {source}", .path.display())]
    ChartDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chart image could not be encoded or written.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading from or writing to the console failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
