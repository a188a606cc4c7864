//! EstateView - a real-estate market dashboard written in Rust
//!
//! Desktop entry point. An optional CSV path on the command line is loaded on
//! startup; otherwise the last opened dataset is reopened.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use estateview::app::EstateViewApp;
use tracing_subscriber::EnvFilter;

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("EstateView");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    set_macos_app_name();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 960.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Real estate data visualization")
            .with_app_id("EstateView")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "EstateView",
        native_options,
        Box::new(move |cc| Ok(Box::new(EstateViewApp::new(cc, initial_file)))),
    )
}
