//! Parser integration tests
//!
//! Tests for the market CSV format:
//! - Parsing of the original column layout
//! - Alternative headers, delimiters and number formats
//! - Error handling

pub mod market_csv_tests;
