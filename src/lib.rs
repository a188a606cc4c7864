//! EstateView - a real-estate market dashboard written in Rust
//!
//! This library loads regional market time series from CSV, detects local
//! peaks and troughs, and turns a region selection into chart descriptions
//! that the desktop UI (or any other shell) displays.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Market CSV loading and the dataset model
//! - [`analysis`] - Extrema detection and population aggregation
//! - [`render`] - Render pipeline and the selection cache
//! - [`format`] - Number formatting for labels and displays
//! - [`settings`] - User settings persistence
//! - [`state`] - Shared UI types and constants
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `menu` - Menu bar (File, View)
//!   - `region_panel` - Region selection and population display
//!   - `chart` - Metric charts with extrema annotations
//!   - `settings_panel` - Settings window
//!   - `toast` - Toast notification system

pub mod analysis;
pub mod app;
pub mod format;
pub mod parsers;
pub mod render;
pub mod settings;
pub mod state;
pub mod ui;
