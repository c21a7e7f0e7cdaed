//! Utility functions for text cleanup and number/time formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{decode_entities, js_parse_int, js_round, parse_time_label, strip_tags, truncate_string};
