//! Main application state and the eframe::App implementation.
//!
//! Rendering of the individual panels lives in [`crate::ui`]; this module owns
//! the state those panels read and the transitions between states (loading a
//! dataset, changing the selection, applying settings).

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::parsers::MarketCsv;
use crate::render::{RenderResult, Renderer};
use crate::settings::UserSettings;
use crate::state::{LoadResult, LoadedDataset, LoadingState, ToastType};

/// Main application state
pub struct EstateViewApp {
    /// Persisted user preferences
    pub(crate) settings: UserSettings,
    /// Currently loaded dataset
    pub(crate) dataset: Option<LoadedDataset>,
    /// Render pipeline for the loaded dataset
    pub(crate) renderer: Option<Renderer>,
    /// Regions selected for display, in selection order
    pub(crate) selected_regions: Vec<String>,
    /// Region search/filter text
    pub(crate) region_search: String,
    /// Last successful render
    pub(crate) result: Option<Arc<RenderResult>>,
    /// Last render failure, shown in place of the charts
    pub(crate) render_error: Option<String>,
    /// Selection or settings changed since the last render
    needs_render: bool,
    /// Toast messages for user feedback (message, time, type)
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,
    /// Track dropped files to prevent duplicates
    last_drop_time: Option<Instant>,
    /// Channel for receiving loaded datasets from background thread
    load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub(crate) loading_state: LoadingState,
    /// Settings window visibility
    pub(crate) show_settings: bool,
}

impl Default for EstateViewApp {
    fn default() -> Self {
        Self::with_settings(UserSettings::default())
    }
}

impl EstateViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        let settings = UserSettings::load();
        let reopen = initial_file.or_else(|| {
            settings
                .last_dataset
                .clone()
                .filter(|path| path.exists())
        });

        let mut app = Self::with_settings(settings);
        if let Some(path) = reopen {
            app.start_loading_file(path);
        }
        app
    }

    pub fn with_settings(settings: UserSettings) -> Self {
        Self {
            settings,
            dataset: None,
            renderer: None,
            selected_regions: Vec::new(),
            region_search: String::new(),
            result: None,
            render_error: None,
            needs_render: false,
            toast_message: None,
            last_drop_time: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            show_settings: false,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start loading a file in the background
    pub fn start_loading_file(&mut self, path: PathBuf) {
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            self.show_toast_warning("A file is already loading");
            return;
        }

        let filename = display_name(&path);
        self.loading_state = LoadingState::Loading(filename);

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = Self::load_file_sync(path);
            let _ = sender.send(result);
        });
    }

    /// Synchronously load a file (runs in background thread)
    fn load_file_sync(path: PathBuf) -> LoadResult {
        match MarketCsv.load_file(&path) {
            Ok(dataset) => LoadResult::Success(Box::new(LoadedDataset {
                name: display_name(&path),
                path,
                dataset: Arc::new(dataset),
            })),
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                LoadResult::Error(e.to_string())
            }
        }
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };

        if let Ok(result) = receiver.try_recv() {
            match result {
                LoadResult::Success(loaded) => self.apply_loaded(*loaded),
                LoadResult::Error(e) => self.show_toast_error(&format!("Error: {}", e)),
            }
            self.load_receiver = None;
            self.loading_state = LoadingState::Idle;
        }
    }

    /// Install a freshly loaded dataset and select its first region
    pub fn apply_loaded(&mut self, loaded: LoadedDataset) {
        let region_count = loaded.dataset.len();
        self.selected_regions = loaded
            .dataset
            .regions()
            .first()
            .map(|first| vec![first.name.clone()])
            .unwrap_or_default();
        self.region_search.clear();

        self.settings.last_dataset = Some(loaded.path.clone());
        self.save_settings();

        self.show_toast_success(&format!(
            "Loaded {} ({} regions)",
            loaded.name, region_count
        ));
        self.dataset = Some(loaded);
        self.rebuild_renderer();
    }

    /// Recreate the renderer from current settings; drops all cached results
    pub fn rebuild_renderer(&mut self) {
        self.result = None;
        self.renderer = None;

        let Some(loaded) = &self.dataset else {
            return;
        };

        match Renderer::new(Arc::clone(&loaded.dataset), self.settings.render_config()) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.needs_render = true;
            }
            Err(e) => {
                self.render_error = Some(e.to_string());
                self.show_toast_error(&e.to_string());
            }
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn is_region_selected(&self, name: &str) -> bool {
        self.selected_regions.iter().any(|r| r == name)
    }

    /// Add or remove a region from the selection
    pub fn toggle_region(&mut self, name: &str) {
        if let Some(pos) = self.selected_regions.iter().position(|r| r == name) {
            self.selected_regions.remove(pos);
        } else {
            self.selected_regions.push(name.to_string());
        }
        self.needs_render = true;
    }

    pub fn clear_selection(&mut self) {
        self.selected_regions.clear();
        self.needs_render = true;
    }

    pub fn set_show_extrema(&mut self, show: bool) {
        if self.settings.show_extrema != show {
            self.settings.show_extrema = show;
            self.save_settings();
            self.needs_render = true;
        }
    }

    /// Re-run the render pipeline if anything changed since the last frame
    pub fn refresh_render(&mut self) {
        if !self.needs_render {
            return;
        }
        self.needs_render = false;

        let Some(renderer) = &self.renderer else {
            return;
        };

        match renderer.render(&self.selected_regions, self.settings.show_extrema) {
            Ok(result) => {
                self.result = Some(result);
                self.render_error = None;
            }
            Err(e) => {
                tracing::warn!("Render failed: {}", e);
                self.result = None;
                self.render_error = Some(e.to_string());
            }
        }
    }

    // ========================================================================
    // Settings and feedback
    // ========================================================================

    pub(crate) fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Could not save settings: {}", e);
        }
    }

    pub fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), Instant::now(), toast_type));
    }

    pub fn show_toast_success(&mut self, message: &str) {
        self.show_toast(message, ToastType::Success);
    }

    pub fn show_toast_warning(&mut self, message: &str) {
        self.show_toast(message, ToastType::Warning);
    }

    pub fn show_toast_error(&mut self, message: &str) {
        self.show_toast(message, ToastType::Error);
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        // Debounce file drops
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 2 {
                return;
            }
        }

        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });

        if let Some(path) = dropped {
            self.last_drop_time = Some(Instant::now());
            self.start_loading_file(path);
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

impl eframe::App for EstateViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading_complete();
        self.handle_dropped_files(ctx);
        self.refresh_render();

        ctx.set_visuals(egui::Visuals::dark());

        // Request repaint while loading (for spinner animation)
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint();
        }

        self.render_toast(ctx);
        self.render_settings_window(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::SidePanel::left("regions_panel")
            .default_width(260.0)
            .min_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_region_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_charts(ui);
        });
    }
}
