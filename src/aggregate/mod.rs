//! Frequency aggregation.
//!
//! Merges any number of independently-ordered frequency sources into one
//! aligned [`crate::models::FrequencyTable`].

pub mod merger;

pub use merger::*;
