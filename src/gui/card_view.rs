use eframe::egui;

use crate::{
    core::{
        Card,
        CardFace,
        EnrichmentState,
    },
    gui::theme::Theme,
};

pub struct CardFlip {
    pub id: u32,
    pub index: usize,
}

/// Which card is showing and which side is up.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeckCursor {
    index: usize,
    flipped: bool,
    deck_generation: u64,
}

impl DeckCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Rewinds to the first card, face up, when the deck was replaced.
    pub fn sync(&mut self, deck_generation: u64, len: usize) {
        if self.deck_generation != deck_generation {
            *self = DeckCursor { deck_generation, ..DeckCursor::default() };
        }
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
            self.flipped = false;
        }
    }

    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
        }
    }

    /// Turns the card over; returns true when the back is now showing.
    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }
}

/// Keyboard shortcuts pressed this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CardKeys {
    pub previous: bool,
    pub next: bool,
    pub flip: bool,
}

impl CardKeys {
    /// Nothing is read while `enabled` is false or a text field has focus.
    pub fn read(ctx: &egui::Context, enabled: bool) -> Self {
        if !enabled || ctx.wants_keyboard_input() {
            return Self::default();
        }
        ctx.input(|i| CardKeys {
            previous: i.key_pressed(egui::Key::ArrowLeft),
            next: i.key_pressed(egui::Key::ArrowRight),
            flip: i.key_pressed(egui::Key::Space),
        })
    }
}

pub struct CardView {
    cursor: DeckCursor,
}

impl CardView {
    pub fn new() -> Self {
        Self { cursor: DeckCursor::default() }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        cards: &[Card],
        deck_generation: u64,
        shortcuts_enabled: bool,
        theme: &Theme,
    ) -> Option<CardFlip> {
        self.cursor.sync(deck_generation, cards.len());

        let mut flip = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let index = self.cursor.index();
            let Some(card) = cards.get(index) else {
                ui.centered_and_justified(|ui| {
                    ui.label("No cards for this week.");
                });
                return;
            };

            let keys = CardKeys::read(ctx, shortcuts_enabled);

            let card_width = (ui.available_width() * 0.7).clamp(280.0, 640.0);
            let card_height = (ui.available_height() * 0.6).clamp(200.0, 420.0);

            let mut clicked = false;
            ui.vertical_centered(|ui| {
                ui.add_space(((ui.available_height() - card_height) / 2.0 - 30.0).max(8.0));
                clicked = self.card_frame(ui, card, theme, egui::vec2(card_width, card_height));
                ui.add_space(16.0);
                self.navigation(ui, cards.len());
            });

            flip = self.handle_input(keys, clicked, card, index, cards.len());
        });

        flip
    }

    /// Applies this frame's click and keys; reports a flip to the back face.
    fn handle_input(
        &mut self,
        keys: CardKeys,
        clicked: bool,
        card: &Card,
        index: usize,
        len: usize,
    ) -> Option<CardFlip> {
        let mut flip = None;

        if (clicked || keys.flip) && self.cursor.flip() {
            flip = Some(CardFlip { id: card.id, index });
        }
        if keys.previous {
            self.cursor.previous();
        }
        if keys.next {
            self.cursor.next(len);
        }
        flip
    }

    fn card_frame(&self, ui: &mut egui::Ui, card: &Card, theme: &Theme, size: egui::Vec2) -> bool {
        let flipped = self.cursor.is_flipped();
        let face = if flipped { &card.back } else { &card.front };

        let frame = egui::Frame::new()
            .fill(theme.card_fill(ui.ctx(), flipped))
            .stroke(theme.card_stroke(ui.ctx(), flipped))
            .corner_radius(12.0)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.set_min_size(size);
                ui.set_max_width(size.x);
                ui.vertical_centered(|ui| {
                    Self::face(ui, face, theme);
                    if flipped && card.enrichment == EnrichmentState::Pending {
                        ui.add_space(8.0);
                        ui.add(egui::Spinner::new());
                    }
                });
            });

        let response = frame.response.interact(egui::Sense::click());
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        response.clicked()
    }

    fn face(ui: &mut egui::Ui, face: &CardFace, theme: &Theme) {
        if !face.title.is_empty() {
            ui.label(theme.heading(ui.ctx(), &face.title).size(18.0));
            ui.add_space(16.0);
        }
        ui.label(egui::RichText::new(&face.body).size(24.0));

        if !face.notes.is_empty() {
            ui.add_space(16.0);
            ui.separator();
            for note in &face.notes {
                ui.label(theme.note(ui.ctx(), note).size(16.0));
            }
        }
    }

    fn navigation(&mut self, ui: &mut egui::Ui, len: usize) {
        ui.horizontal(|ui| {
            let width = 200.0;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));

            if ui.add_enabled(self.cursor.index() > 0, egui::Button::new("◀")).clicked() {
                self.cursor.previous();
            }
            ui.label(format!("{} / {}", self.cursor.index() + 1, len));
            if ui.add_enabled(self.cursor.index() + 1 < len, egui::Button::new("▶")).clicked() {
                self.cursor.next(len);
            }
        });
    }
}

impl Default for CardView {
    fn default() -> Self {
        Self::new()
    }
}
