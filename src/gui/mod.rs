pub mod app;
pub mod card_view;
pub mod loading_overlay;
pub mod settings;
pub mod theme;
pub mod top_bar;

pub use app::FlashdeckApp;
