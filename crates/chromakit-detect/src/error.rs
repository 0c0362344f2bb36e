use std::path::PathBuf;

use chromakit_color::ConversionError;
use chromakit_image::ImageError;
use chromakit_imgproc::parallel::ParallelError;
use chromakit_io::IoError;

/// An error type for the detect module.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    /// Neither the primary nor the fallback reference location holds a file.
    #[error(
        "Reference image not found in {} or {}",
        .primary.display(),
        .fallback.display()
    )]
    ReferenceNotFound {
        /// The per-space location tried first.
        primary: PathBuf,
        /// The location next to the candidate.
        fallback: PathBuf,
    },

    /// Every reconstruction hypothesis failed.
    #[error("No color space hypothesis could reconstruct the candidate")]
    NoValidHypothesis,

    /// A 4-channel candidate was given without a provenance label.
    #[error("A 4-channel candidate needs a provenance label")]
    MissingProvenance,

    /// Error raised by the conversion engine.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Error raised while manipulating a pixel buffer.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised while reading the candidate or the reference.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error raised while scheduling the hypotheses.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
