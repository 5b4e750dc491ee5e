//! Core domain types for chat-lens.
//!
//! Holds the message/statistics data model shared by the parsing and
//! aggregation layer, the typed error enum of the file-acquisition layer,
//! calendar derivation for transcript timestamps, and the number formatting
//! used by the presentation layer.

pub mod error;
pub mod formatting;
pub mod models;
pub mod time_utils;

pub use error::{LensError, Result};
