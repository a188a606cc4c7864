//! Core module tests for the analysis and render layers
//!
//! Tests for:
//! - Extrema detection
//! - Selection cache
//! - Render pipeline
//! - Settings persistence

pub mod extrema_tests;
pub mod settings_tests;
