use eframe::egui;

use crate::gui::theme::Theme;

/// Full-window spinner shown until the first deck arrives.
pub struct LoadingOverlay {
    message: String,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self { message: "Loading vocabulary...".to_string() }
    }

    pub fn show(&self, ctx: &egui::Context, theme: &Theme) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    let top_space = (ui.available_height() / 2.0 - 40.0).max(0.0);
                    ui.add_space(top_space);
                    ui.add(egui::Spinner::new().size(48.0).color(theme.accent(ui.ctx())));
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(&self.message).color(theme.muted(ui.ctx())));
                });
            });
        });
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
