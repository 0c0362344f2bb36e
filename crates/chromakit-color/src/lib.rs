#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// conversion engine routing every conversion through BGR.
pub mod engine;

/// Error types for the conversion engine.
pub mod error;

/// color space identifiers.
pub mod space;

/// table of direct transforms to and from BGR.
pub mod table;

pub use crate::engine::{convert, convert_named, ConversionEngine};
pub use crate::error::ConversionError;
pub use crate::space::ColorSpaceId;
pub use crate::table::{ColorTransform, ConversionTable};
