//! proftafla library
//!
//! Fetches exam schedules for University of Iceland departments, parses the HTML
//! tables into records, and caches results with a time-to-live.

pub mod cache;
pub mod cli;
pub mod data;
