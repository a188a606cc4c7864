//! UI rendering modules for the EstateView application.
//!
//! Each submodule adds `render_*` methods to [`crate::app::EstateViewApp`]:
//!
//! - `menu` - Menu bar (File, View)
//! - `region_panel` - Region search and multi-select, extrema toggle, population
//! - `chart` - One plot per metric with peak and trough annotations
//! - `settings_panel` - Settings window (detection threshold, cache, palette)
//! - `toast` - Toast notification system

pub mod chart;
pub mod menu;
pub mod region_panel;
pub mod settings_panel;
pub mod toast;
