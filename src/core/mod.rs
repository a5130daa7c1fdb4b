pub mod controller;
pub mod deck;
pub mod errors;
pub mod http;
pub mod models;
pub mod parser;
pub mod tasks;

pub use controller::{
    DeckController,
    DeckPhase,
};
pub use errors::FlashdeckError;
pub use models::{
    Card,
    CardFace,
    EnrichmentResult,
    EnrichmentState,
    VocabularyEntry,
    WeekFilter,
    ALL_WEEKS,
};
