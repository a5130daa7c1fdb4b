use std::env;

use tracing::info;

use crate::enrichment::DEFAULT_GEMINI_MODEL;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DOCUMENT_ID: &str = "1cba4NFq-IbZNaNnMw0WQDern05x3rD0wwhIYTEPlk48";

const DOCUMENT_ID_ENV: &str = "FLASHDECK_DOCUMENT_ID";
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub document_id: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub enrichment_enabled: bool,
    pub dark_mode: bool,

    // Environment overrides, never written back to settings.json
    #[serde(skip)]
    pub(crate) env_document_id: Option<String>,
    #[serde(skip)]
    pub(crate) env_api_key: Option<String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            document_id: DEFAULT_DOCUMENT_ID.to_string(),
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            enrichment_enabled: true,
            dark_mode: true,
            env_document_id: None,
            env_api_key: None,
        }
    }
}

impl SettingsData {
    /// Environment variables win over the saved file.
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(env::var(DOCUMENT_ID_ENV).ok(), env::var(GEMINI_API_KEY_ENV).ok())
    }

    pub(crate) fn apply_overrides(
        mut self,
        document_id: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        if let Some(document_id) = document_id.filter(|v| !v.trim().is_empty()) {
            info!("Using document id from {}", DOCUMENT_ID_ENV);
            self.env_document_id = Some(document_id.trim().to_string());
        }
        if let Some(api_key) = api_key.filter(|v| !v.trim().is_empty()) {
            info!("Using Gemini API key from {}", GEMINI_API_KEY_ENV);
            self.env_api_key = Some(api_key.trim().to_string());
        }
        self
    }

    /// Document to fetch: the environment override, else the saved id.
    pub fn document_id(&self) -> &str {
        self.env_document_id.as_deref().unwrap_or(&self.document_id)
    }

    /// Key sent to Gemini: the environment override, else the saved key.
    pub fn api_key(&self) -> &str {
        self.env_api_key.as_deref().unwrap_or(self.gemini_api_key.trim())
    }

    pub fn has_env_api_key(&self) -> bool {
        self.env_api_key.is_some()
    }

    /// Copies the environment overrides of `other` onto these settings.
    pub fn keep_overrides_of(mut self, other: &SettingsData) -> Self {
        self.env_document_id = other.env_document_id.clone();
        self.env_api_key = other.env_api_key.clone();
        self
    }

    pub fn can_enrich(&self) -> bool {
        self.enrichment_enabled && !self.api_key().is_empty()
    }
}
