//! Menu bar UI components (File, View menus).

use eframe::egui;

use crate::app::EstateViewApp;
use crate::state::{LoadingState, SUPPORTED_EXTENSIONS};

impl EstateViewApp {
    /// Render the application menu bar
    pub fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.style_mut()
                .text_styles
                .insert(egui::TextStyle::Button, egui::FontId::proportional(15.0));

            ui.menu_button("File", |ui| {
                ui.set_min_width(180.0);

                let is_loading = matches!(self.loading_state, LoadingState::Loading(_));

                if ui
                    .add_enabled(!is_loading, egui::Button::new("Open CSV..."))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Market data", SUPPORTED_EXTENSIONS)
                        .pick_file()
                    {
                        self.start_loading_file(path);
                    }
                    ui.close();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                ui.set_min_width(200.0);

                let mut show_extrema = self.settings.show_extrema;
                if ui
                    .checkbox(&mut show_extrema, "Show peaks and troughs")
                    .changed()
                {
                    self.set_show_extrema(show_extrema);
                }

                ui.separator();

                if ui.button("Settings...").clicked() {
                    self.show_settings = true;
                    ui.close();
                }
            });

            // Loading indicator on the right side of the menu bar
            if let LoadingState::Loading(name) = &self.loading_state {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("Loading {}...", name))
                            .color(egui::Color32::GRAY),
                    );
                    ui.spinner();
                });
            }
        });
    }
}
