pub mod api;
pub mod types;

pub use api::{
    build_prompt,
    GeminiClient,
    DEFAULT_GEMINI_MODEL,
};
pub use types::{
    extract_reply_text,
    parse_enrichment_reply,
};
