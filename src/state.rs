//! Core application state types and constants.
//!
//! This module contains the data structures shared by the desktop shell:
//! the loaded dataset, loading state, toast types and color palettes.

use std::path::PathBuf;
use std::sync::Arc;

use crate::parsers::Dataset;

// ============================================================================
// Constants
// ============================================================================

/// Supported dataset file extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Height of a single metric chart in pixels
pub const CHART_HEIGHT: f32 = 260.0;

/// Vertical gap between charts in pixels
pub const CHART_SPACING: f32 = 20.0;

/// Color of peak markers and labels
pub const PEAK_COLOR: [u8; 3] = [253, 193, 73];

/// Color of trough markers and labels
pub const TROUGH_COLOR: [u8; 3] = [220, 50, 47];

/// Color palette for chart lines (matches original theme)
pub const CHART_COLORS: &[[u8; 3]] = &[
    [113, 120, 78],  // Olive green (primary)
    [191, 78, 48],   // Rust orange (accent)
    [71, 108, 155],  // Blue (info)
    [159, 166, 119], // Sage green (success)
    [246, 247, 235], // Cream
    [100, 149, 237], // Cornflower blue
    [255, 127, 80],  // Coral
    [144, 238, 144], // Light green
];

/// Colorblind-friendly palette (based on Wong's optimized palette)
pub const COLORBLIND_COLORS: &[[u8; 3]] = &[
    [0, 114, 178],   // Blue
    [230, 159, 0],   // Orange
    [0, 158, 115],   // Bluish green
    [204, 121, 167], // Reddish purple
    [86, 180, 233],  // Sky blue
    [213, 94, 0],    // Vermillion
    [240, 228, 66],  // Yellow
    [153, 153, 153], // Gray
];

/// Pick the line color for the trace at `index`
pub fn trace_color(index: usize, color_blind_mode: bool) -> [u8; 3] {
    let palette = if color_blind_mode {
        COLORBLIND_COLORS
    } else {
        CHART_COLORS
    };
    palette[index % palette.len()]
}

// ============================================================================
// Core Types
// ============================================================================

/// A dataset loaded from disk
#[derive(Clone)]
pub struct LoadedDataset {
    /// Path to the original file
    pub path: PathBuf,
    /// Display name for the file
    pub name: String,
    pub dataset: Arc<Dataset>,
}

/// Result from background file loading
pub enum LoadResult {
    Success(Box<LoadedDataset>),
    Error(String),
}

/// Loading state
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
}

/// Toast notification type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],
            ToastType::Success => [113, 120, 78],
            ToastType::Warning => [253, 193, 73],
            ToastType::Error => [135, 30, 28],
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],
        }
    }
}
