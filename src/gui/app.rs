use eframe::egui;
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    card_view::{
        CardFlip,
        CardView,
    },
    loading_overlay::LoadingOverlay,
    settings::{
        data::SETTINGS_FILE,
        SettingsData,
        SettingsModal,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        controller::LoadRequest,
        http::document_export_url,
        tasks::{
            TaskManager,
            TaskResult,
        },
        DeckController,
        DeckPhase,
        FlashdeckError,
        WeekFilter,
    },
    persistence::save_json,
};

pub struct FlashdeckApp {
    // Deck state
    controller: DeckController,

    // Configuration
    settings_data: SettingsData,

    // UI State
    card_view: CardView,
    loading_overlay: LoadingOverlay,
    settings_modal: SettingsModal,
    theme: Theme,

    task_manager: TaskManager,
}

impl FlashdeckApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_data: SettingsData,
    ) -> Result<Self, FlashdeckError> {
        let mut task_manager = TaskManager::new()?;

        let repaint_ctx = cc.egui_ctx.clone();
        task_manager.set_waker(move || repaint_ctx.request_repaint());

        let mut app = Self {
            controller: DeckController::new(),
            settings_data,
            card_view: CardView::new(),
            loading_overlay: LoadingOverlay::new(),
            settings_modal: SettingsModal::new(),
            theme: Theme::dracula(),
            task_manager,
        };

        app.setup_theme(cc);

        let request = app.controller.initial_load();
        app.start_load(request);

        Ok(app)
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        set_theme(&cc.egui_ctx, &self.theme);

        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = if self.settings_data.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });
    }

    fn start_load(&mut self, request: LoadRequest) {
        let url = document_export_url(self.settings_data.document_id());
        self.task_manager.load_document(request, url);
    }

    fn select_week(&mut self, filter: WeekFilter) {
        if let Some(request) = self.controller.select_week(filter) {
            self.start_load(request);
        }
    }

    fn reload(&mut self) {
        let request = self.controller.reload();
        self.start_load(request);
    }

    fn on_card_flip(&mut self, flip: CardFlip) {
        if !self.settings_data.can_enrich() {
            debug!("Enrichment disabled or no API key; card {} left as is", flip.id);
            return;
        }

        if let Some(request) = self.controller.on_card_flip(flip.id, flip.index) {
            debug!("Requesting enrichment for '{}'", request.word);
            self.task_manager.enrich_card(
                request,
                self.settings_data.gemini_model.clone(),
                self.settings_data.api_key().to_string(),
            );
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        debug!("Task finished: {}", result.task_type());

        match result {
            TaskResult::DocumentLoaded { generation, result } => match result {
                Ok(content) => {
                    self.controller.apply_document(generation, &content, &mut rand::rng());
                }
                Err(e) => self.controller.load_failed(generation, &e),
            },

            TaskResult::CardEnriched { deck_generation, card_id, result } => match result {
                Ok(enrichment) => {
                    self.controller.apply_enrichment(deck_generation, card_id, &enrichment);
                }
                Err(e) => {
                    self.controller.enrichment_failed(deck_generation, card_id, &e);
                }
            },
        }
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        let settings = settings.keep_overrides_of(&self.settings_data);
        let document_changed = settings.document_id() != self.settings_data.document_id();
        self.settings_data = settings;
        self.save_settings();

        if document_changed {
            info!("Document changed, reloading deck");
            self.reload();
        }
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            warn!("Failed to save settings: {}", e);
        }
    }
}

impl eframe::App for FlashdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        if let Some(action) = TopBar::show(ctx, &self.controller, self.settings_data.can_enrich())
        {
            match action {
                TopBarAction::SelectWeek(filter) => self.select_week(filter),
                TopBarAction::Reload => self.reload(),
                TopBarAction::OpenSettings => {
                    self.settings_modal.open_settings(self.settings_data.clone())
                }
            }
        }

        match self.controller.phase() {
            DeckPhase::Loading => self.loading_overlay.show(ctx, &self.theme),
            DeckPhase::Ready => {
                let shortcuts_enabled = !self.settings_modal.is_open();
                if let Some(flip) = self.card_view.show(
                    ctx,
                    self.controller.cards(),
                    self.controller.deck_generation(),
                    shortcuts_enabled,
                    &self.theme,
                ) {
                    self.on_card_flip(flip);
                }
            }
        }

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }

        self.sync_theme_preference(ctx);
    }
}
