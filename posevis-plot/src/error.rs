//! Errors raised while rendering or presenting pose figures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    /// Nothing to draw.
    #[error("no camera poses to plot")]
    EmptyTrajectory,

    /// A figure setting is out of range.
    #[error("invalid figure configuration: {0}")]
    Config(String),

    /// The figure configuration file is not valid JSON.
    #[error("failed to parse figure configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The requested output extension has no raster encoder.
    #[error("unsupported image format '{0}'")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The interactive viewer could not be reached.
    #[error("viewer error: {0}")]
    Viewer(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
