//! Region selection panel: search, multi-select list, extrema toggle and
//! the population display.

use eframe::egui;

use crate::app::EstateViewApp;

impl EstateViewApp {
    /// Render the left-hand region panel
    pub fn render_region_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading("Regions");
        ui.add_space(8.0);

        let Some(loaded) = &self.dataset else {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No dataset loaded")
                        .size(14.0)
                        .color(egui::Color32::GRAY),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Open or drop a CSV file to begin")
                        .size(12.0)
                        .color(egui::Color32::from_rgb(100, 100, 100)),
                );
            });
            return;
        };

        let dataset = std::sync::Arc::clone(&loaded.dataset);
        ui.label(
            egui::RichText::new(&loaded.name)
                .size(12.0)
                .color(egui::Color32::GRAY),
        );
        if let Some((first, last)) = dataset.date_range() {
            ui.label(
                egui::RichText::new(format!("{} - {}", first, last))
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        }
        ui.add_space(8.0);

        // Population display
        let population = self
            .result
            .as_ref()
            .map(|r| r.population_display())
            .unwrap_or_default();
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(45, 48, 40))
            .corner_radius(4)
            .inner_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(population).size(15.0).strong());
            });

        ui.add_space(8.0);

        let mut show_extrema = self.settings.show_extrema;
        if ui
            .checkbox(&mut show_extrema, "Show peaks and troughs")
            .changed()
        {
            self.set_show_extrema(show_extrema);
        }

        ui.add_space(8.0);

        // Search box
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(50, 50, 50))
            .corner_radius(4)
            .inner_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.region_search)
                        .hint_text("Search regions...")
                        .desired_width(f32::INFINITY)
                        .frame(false),
                );
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "Selected: {} / {}",
                    self.selected_regions.len(),
                    dataset.len()
                ))
                .size(12.0)
                .color(egui::Color32::GRAY),
            );
            if !self.selected_regions.is_empty() && ui.small_button("Clear").clicked() {
                self.clear_selection();
            }
        });

        ui.add_space(4.0);
        ui.separator();
        ui.add_space(4.0);

        let search_lower = self.region_search.to_lowercase();
        let mut toggled: Option<String> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for region in dataset.regions() {
                    if !search_lower.is_empty()
                        && !region.name.to_lowercase().contains(&search_lower)
                    {
                        continue;
                    }

                    let is_selected = self.is_region_selected(&region.name);
                    let text_color = if is_selected {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::LIGHT_GRAY
                    };
                    let bg_color = if is_selected {
                        egui::Color32::from_rgb(55, 60, 50)
                    } else {
                        egui::Color32::TRANSPARENT
                    };

                    let response = egui::Frame::NONE
                        .fill(bg_color)
                        .corner_radius(3)
                        .inner_margin(egui::Margin::symmetric(6, 3))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                let check = if is_selected { "☑" } else { "☐" };
                                ui.label(egui::RichText::new(check).size(14.0).color(text_color));
                                ui.label(
                                    egui::RichText::new(&region.name)
                                        .size(14.0)
                                        .color(text_color),
                                );
                            });
                        })
                        .response
                        .interact(egui::Sense::click());

                    if response.clicked() {
                        toggled = Some(region.name.clone());
                    }
                    if response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                }
            });

        if let Some(name) = toggled {
            self.toggle_region(&name);
        }
    }
}
