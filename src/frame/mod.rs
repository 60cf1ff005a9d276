//! # Frame Module
//!
//! Pixel buffer representation and lossless encoding for captured photos.
//!
//! A [`PixelBuffer`] is a rectangular grid of normalized RGB samples, the
//! common currency between the frame source, the filter engine, and the
//! persistence sink. Encoding to PNG bytes lives in [`encode`].

pub mod buffer;
pub mod encode;

pub use buffer::PixelBuffer;
pub use encode::encode_png;
