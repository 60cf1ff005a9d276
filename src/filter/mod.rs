//! # Filter Module
//!
//! The closed set of photo filters and the pure transforms behind them.
//!
//! ## Built-in Filters
//!
//! - **None**: pass the frame through unchanged
//! - **Grayscale**: average the three channels
//! - **Sepia**: fixed-coefficient warm color mix
//! - **Negative**: invert every channel
//!
//! Exactly one filter is active at a time; selecting a new one replaces the
//! previous selection. Applying a filter never changes buffer dimensions and
//! always leaves every channel inside `[0.0, 1.0]`.

pub mod engine;
pub mod kind;

pub use engine::apply;
pub use kind::FilterKind;
