#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Classification of 3-channel buffers against a trusted reference.
pub mod classifier;

/// Error types for the detect module.
pub mod error;

/// Channel-count report for buffers without a reference.
pub mod hint;

/// File system convention used to find the reference of a candidate file.
pub mod reference;

pub use crate::classifier::{Classification, ClassifierConfig, SpaceClassifier, VerdictBasis};
pub use crate::error::DetectError;
pub use crate::hint::{channel_hint, ChannelHint};
pub use crate::reference::ReferenceLocator;
