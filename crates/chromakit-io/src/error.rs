/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] chromakit_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to decode a raw array file.
    #[error("Failed to decode the raw array. {0}")]
    RawArrayDecodeError(#[from] bincode::error::DecodeError),

    /// Error to encode a raw array file.
    #[error("Failed to encode the raw array. {0}")]
    RawArrayEncodeError(#[from] bincode::error::EncodeError),

    /// Error when the channel count cannot be stored in the requested format.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannelCount(usize),
}
