//! Table output.
//!
//! Serializes a filtered [`crate::models::FrequencyTable`] as
//! tab-separated text.

pub mod emitter;

pub use emitter::*;
