//! Image quality and similarity metrics.
//!
//! # Available Metrics
//!
//! - **MSE** (Mean Squared Error): Average squared difference between samples
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale

mod mse;

pub use mse::{mse, psnr};
