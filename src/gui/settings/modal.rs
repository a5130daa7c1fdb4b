use eframe::egui;

use super::data::SettingsData;

pub struct SettingsModal {
    open: bool,
    settings: SettingsData,
    original_settings: SettingsData,
    show_api_key: bool,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            settings: SettingsData::default(),
            original_settings: SettingsData::default(),
            show_api_key: false,
        }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.settings = current_settings.clone();
        self.original_settings = current_settings;
        self.show_api_key = false;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dirty(&self) -> bool {
        self.settings != self.original_settings
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(480.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Document ID:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.document_id)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Gemini API key:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.settings.gemini_api_key)
                            .password(!self.show_api_key)
                            .desired_width(280.0),
                    );
                    ui.toggle_value(&mut self.show_api_key, "👁");
                });
                ui.end_row();

                if self.settings.has_env_api_key() {
                    ui.label("");
                    ui.small("GEMINI_API_KEY from the environment is used instead.");
                    ui.end_row();
                }

                ui.label("Gemini model:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.gemini_model)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut self.settings.enrichment_enabled, "Fetch examples on flip");
                ui.end_row();
            });

            ui.add_space(10.0);
            ui.separator();

            let is_dirty = self.is_dirty();
            ui.horizontal(|ui| {
                if ui.add_enabled(is_dirty, egui::Button::new("Save Settings")).clicked() {
                    self.original_settings = self.settings.clone();
                    result = Some(self.settings.clone());
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    self.settings = self.original_settings.clone();
                    ui.close();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Restore Default").clicked() {
                        self.settings = SettingsData {
                            gemini_api_key: self.settings.gemini_api_key.clone(),
                            dark_mode: self.settings.dark_mode,
                            ..SettingsData::default()
                        }
                        .keep_overrides_of(&self.original_settings);
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
