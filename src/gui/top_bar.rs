use eframe::egui::{
    self,
    containers,
};

use crate::core::{
    DeckController,
    DeckPhase,
    WeekFilter,
};

pub enum TopBarAction {
    SelectWeek(WeekFilter),
    Reload,
    OpenSettings,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        controller: &DeckController,
        enrichment_ready: bool,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Reload Deck").clicked() {
                        action = Some(TopBarAction::Reload);
                    }
                    if ui.button("Settings").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if controller.phase() == DeckPhase::Ready {
                    ui.separator();

                    if let Some(filter) =
                        Self::week_selector(ui, controller.weeks(), controller.selected())
                    {
                        action = Some(TopBarAction::SelectWeek(filter));
                    }

                    if ui.button("🔀").on_hover_text("Reload and reshuffle").clicked() {
                        action = Some(TopBarAction::Reload);
                    }

                    if controller.is_reloading() {
                        ui.add(egui::Spinner::new());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status(ui, enrichment_ready);
                });
            });
        });

        action
    }

    fn week_selector(
        ui: &mut egui::Ui,
        weeks: &[String],
        selected: &WeekFilter,
    ) -> Option<WeekFilter> {
        let mut choice = selected.label().to_string();

        egui::ComboBox::from_id_salt("week_selector").selected_text(choice.clone()).show_ui(
            ui,
            |ui| {
                for week in weeks {
                    ui.selectable_value(&mut choice, week.clone(), week.as_str());
                }
            },
        );

        if choice != selected.label() {
            Some(WeekFilter::from_label(&choice))
        } else {
            None
        }
    }

    fn show_status(ui: &mut egui::Ui, enrichment_ready: bool) {
        let (color, tooltip) = if enrichment_ready {
            (egui::Color32::from_rgb(0, 200, 0), "Examples are fetched when a card is flipped")
        } else {
            (egui::Color32::from_rgb(200, 80, 80), "Set a Gemini API key to fetch examples")
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Gemini").on_hover_text(tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        });
    }
}
