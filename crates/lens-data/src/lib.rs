//! Data layer for chat-lens.
//!
//! Responsible for pulling transcript text out of an upload (plain `.txt`
//! or `.zip` export archive), parsing it into discrete messages, aggregating
//! per-participant and time-bucketed statistics, deriving chart-ready series
//! and running the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod charts;
pub mod extract;
pub mod parser;

pub use lens_core as core;
