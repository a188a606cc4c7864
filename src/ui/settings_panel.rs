//! Settings window: detection threshold, cache capacity, display options and
//! cache diagnostics.

use eframe::egui;

use crate::app::EstateViewApp;

/// Threshold slider range, as a percentage
const THRESHOLD_PERCENT_RANGE: std::ops::RangeInclusive<f64> = 0.1..=25.0;

/// Cache capacity slider range
const CACHE_CAPACITY_RANGE: std::ops::RangeInclusive<usize> = 0..=512;

impl EstateViewApp {
    /// Render the settings window if it is open
    pub fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        let mut rebuild = false;
        let mut clear_cache = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Peak detection")
                    .default_open(true)
                    .show(ui, |ui| {
                        let mut percent = self.settings.extrema_threshold * 100.0;
                        let response = ui.add(
                            egui::Slider::new(&mut percent, THRESHOLD_PERCENT_RANGE)
                                .text("Threshold")
                                .suffix("%")
                                .max_decimals(1),
                        );
                        ui.label(
                            egui::RichText::new(
                                "A point is marked when it differs from both neighbours by more than this",
                            )
                            .size(11.0)
                            .color(egui::Color32::GRAY),
                        );
                        if response.changed() {
                            self.settings.extrema_threshold = percent / 100.0;
                        }
                        // Rebuild once the drag ends so each step does not flush the cache
                        if response.drag_stopped() || (response.changed() && !response.dragged()) {
                            rebuild = true;
                        }
                    });

                egui::CollapsingHeader::new("Display")
                    .default_open(true)
                    .show(ui, |ui| {
                        let mut show_extrema = self.settings.show_extrema;
                        if ui
                            .checkbox(&mut show_extrema, "Show peaks and troughs")
                            .changed()
                        {
                            self.set_show_extrema(show_extrema);
                        }

                        if ui
                            .checkbox(&mut self.settings.color_blind_mode, "Color blind mode")
                            .on_hover_text("Use a palette distinguishable with color vision deficiency")
                            .changed()
                        {
                            self.save_settings();
                        }
                    });

                egui::CollapsingHeader::new("Render cache")
                    .default_open(true)
                    .show(ui, |ui| {
                        let response = ui.add(
                            egui::Slider::new(
                                &mut self.settings.cache_capacity,
                                CACHE_CAPACITY_RANGE,
                            )
                            .text("Capacity"),
                        );
                        if response.drag_stopped() || (response.changed() && !response.dragged())
                        {
                            rebuild = true;
                        }

                        if let Some(renderer) = &self.renderer {
                            let cache = renderer.cache();
                            let stats = cache.stats();
                            ui.label(format!(
                                "Entries: {} / {}",
                                cache.len(),
                                cache.capacity()
                            ));
                            ui.label(format!(
                                "Hits: {}  Misses: {}  Evictions: {}",
                                stats.hits, stats.misses, stats.evictions
                            ));
                            ui.label(format!(
                                "Approximate size: {:.1} KiB",
                                cache.memory_footprint_estimate() as f64 / 1024.0
                            ));
                            if ui.button("Clear cache").clicked() {
                                clear_cache = true;
                            }
                        } else {
                            ui.label(
                                egui::RichText::new("No dataset loaded")
                                    .color(egui::Color32::GRAY),
                            );
                        }
                    });
            });

        if clear_cache {
            if let Some(renderer) = &self.renderer {
                renderer.cache().clear();
            }
            self.show_toast_success("Render cache cleared");
        }

        if rebuild {
            self.save_settings();
            self.rebuild_renderer();
        }

        if !open {
            self.show_settings = false;
        }
    }
}
