use rand::Rng;
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    deck::build_deck,
    parser::parse_document,
    Card,
    EnrichmentResult,
    EnrichmentState,
    WeekFilter,
    ALL_WEEKS,
};

/// Loading lasts until the first document is applied and never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub filter: WeekFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichRequest {
    pub deck_generation: u64,
    pub card_id: u32,
    pub word: String,
}

pub struct DeckController {
    phase: DeckPhase,
    selected: WeekFilter,
    weeks: Vec<String>,
    cards: Vec<Card>,
    pending_load: Option<LoadRequest>,
    load_generation: u64,
    deck_generation: u64,
}

impl DeckController {
    pub fn new() -> Self {
        Self {
            phase: DeckPhase::Loading,
            selected: WeekFilter::All,
            weeks: vec![ALL_WEEKS.to_string()],
            cards: Vec::new(),
            pending_load: None,
            load_generation: 0,
            deck_generation: 0,
        }
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn selected(&self) -> &WeekFilter {
        &self.selected
    }

    pub fn weeks(&self) -> &[String] {
        &self.weeks
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deck_generation(&self) -> u64 {
        self.deck_generation
    }

    pub fn is_reloading(&self) -> bool {
        self.phase == DeckPhase::Ready && self.pending_load.is_some()
    }

    /// Starts a fetch for `filter`. Any load still in flight becomes stale.
    pub fn load_data(&mut self, filter: WeekFilter) -> LoadRequest {
        self.load_generation += 1;
        self.selected = filter.clone();

        let request = LoadRequest { generation: self.load_generation, filter };
        self.pending_load = Some(request.clone());
        info!("Loading deck for week filter '{}'", request.filter);
        request
    }

    pub fn initial_load(&mut self) -> LoadRequest {
        self.load_data(self.selected.clone())
    }

    pub fn select_week(&mut self, filter: WeekFilter) -> Option<LoadRequest> {
        if filter == self.selected {
            return None;
        }
        Some(self.load_data(filter))
    }

    pub fn reload(&mut self) -> LoadRequest {
        self.load_data(self.selected.clone())
    }

    fn take_pending(&mut self, generation: u64) -> Option<LoadRequest> {
        let is_current =
            self.pending_load.as_ref().is_some_and(|request| request.generation == generation);

        if !is_current {
            debug!("Dropping stale load result (generation {})", generation);
            return None;
        }
        self.pending_load.take()
    }

    /// Parses and shuffles a fetched document into a fresh deck.
    pub fn apply_document<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        content: &str,
        rng: &mut R,
    ) -> bool {
        let Some(request) = self.take_pending(generation) else {
            return false;
        };

        let parsed = parse_document(content, &request.filter);
        let cards = build_deck(parsed.entries, rng);

        let mut weeks = Vec::with_capacity(parsed.weeks.len() + 1);
        weeks.push(ALL_WEEKS.to_string());
        weeks.extend(parsed.weeks);

        info!("Built deck of {} cards across {} weeks", cards.len(), weeks.len() - 1);

        self.cards = cards;
        self.weeks = weeks;
        self.deck_generation += 1;
        self.phase = DeckPhase::Ready;
        true
    }

    /// Logs a failed fetch; the current deck (or the loader) stays as it is.
    pub fn load_failed(&mut self, generation: u64, error: &str) {
        if self.take_pending(generation).is_some() {
            warn!("Failed to load document: {}", error);
        }
    }

    /// Marks the card at `index` as waiting for enrichment.
    ///
    /// Returns `None` when the card is missing, doesn't carry `id`, or already
    /// has (or is waiting for) its enrichment.
    pub fn on_card_flip(&mut self, id: u32, index: usize) -> Option<EnrichRequest> {
        let deck_generation = self.deck_generation;
        let card = self.cards.get_mut(index).filter(|card| card.id == id)?;

        if card.enrichment != EnrichmentState::NotRequested {
            return None;
        }

        card.enrichment = EnrichmentState::Pending;
        Some(EnrichRequest { deck_generation, card_id: id, word: card.english.clone() })
    }

    fn card_for(&mut self, deck_generation: u64, id: u32) -> Option<&mut Card> {
        if deck_generation != self.deck_generation {
            debug!("Dropping enrichment for card {} of a replaced deck", id);
            return None;
        }
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn apply_enrichment(
        &mut self,
        deck_generation: u64,
        id: u32,
        enrichment: &EnrichmentResult,
    ) -> bool {
        let Some(card) = self.card_for(deck_generation, id) else {
            return false;
        };

        card.apply_enrichment(enrichment);
        true
    }

    pub fn enrichment_failed(&mut self, deck_generation: u64, id: u32, error: &str) {
        if let Some(card) = self.card_for(deck_generation, id) {
            warn!("Failed to enrich '{}': {}", card.english, error);
            card.enrichment = EnrichmentState::NotRequested;
        }
    }
}

impl Default for DeckController {
    fn default() -> Self {
        Self::new()
    }
}
