use reqwest::Client;
use tracing::{
    debug,
    error,
};

use super::types::{
    extract_reply_text,
    parse_enrichment_reply,
    GenerateContentRequest,
    GenerateContentResponse,
};
use crate::core::{
    http::ensure_success,
    EnrichmentResult,
    FlashdeckError,
};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Instruction asking for `<pronunciation>/<English sentence>/<Vietnamese sentence>/`.
pub fn build_prompt(word: &str) -> String {
    format!(
        "For the English word \"{word}\", give its IPA pronunciation, one short example sentence \
         in English that uses it, and the Vietnamese translation of that sentence. \
         Reply with a single line in exactly this format and nothing else: \
         <pronunciation>/<English sentence>/<Vietnamese sentence>/"
    )
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: Client, model: &str, api_key: &str) -> Result<Self, FlashdeckError> {
        if api_key.trim().is_empty() {
            return Err(FlashdeckError::MissingApiKey);
        }

        let model = if model.trim().is_empty() { DEFAULT_GEMINI_MODEL } else { model.trim() };

        Ok(Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one prompt and returns the raw reply text.
    pub async fn generate(&self, prompt: String) -> Result<String, FlashdeckError> {
        let url = self.endpoint();
        debug!("Sending prompt to {}", url);

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        ensure_success(&resp)?;

        let body = resp.text().await?;
        let response: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode generation reply: {}", e);
            FlashdeckError::Json(e)
        })?;

        Ok(extract_reply_text(&response).to_string())
    }

    pub async fn enrich(&self, word: &str) -> Result<EnrichmentResult, FlashdeckError> {
        let reply = self.generate(build_prompt(word)).await?;
        debug!("Enrichment reply for '{}': {}", word, reply);
        Ok(parse_enrichment_reply(&reply))
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{
            AsyncReadExt,
            AsyncWriteExt,
        },
        net::TcpListener,
    };

    use super::*;

    async fn serve_json_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/v1beta/models", addr)
    }

    fn local_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_prompt_names_word_and_format() {
        let prompt = build_prompt("serendipity");
        assert!(prompt.contains("\"serendipity\""));
        assert!(prompt.contains("<pronunciation>/<English sentence>/<Vietnamese sentence>/"));
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(
            GeminiClient::new(local_client(), "", "   "),
            Err(FlashdeckError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(local_client(), "", "key").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );

        let client = GeminiClient::new(local_client(), "gemini-pro", "key")
            .unwrap()
            .with_base_url("http://localhost:9/models/");
        assert_eq!(client.endpoint(), "http://localhost:9/models/gemini-pro:generateContent");
    }

    #[tokio::test]
    async fn test_enrich_parses_reply() {
        let base_url = serve_json_once(
            r#"{"candidates":[{"content":{"parts":[{"text":"/kæt/The cat sleeps./Con mèo ngủ./"}]}}]}"#,
        )
        .await;
        let client = GeminiClient::new(local_client(), "", "key").unwrap().with_base_url(&base_url);

        let result = client.enrich("cat").await.unwrap();
        assert_eq!(result.pronunciation, "kæt");
        assert_eq!(result.english_clause, "The cat sleeps.");
        assert_eq!(result.vietnamese_clause, "Con mèo ngủ.");
    }

    #[tokio::test]
    async fn test_enrich_empty_reply_defaults() {
        let base_url = serve_json_once(r#"{"candidates":[]}"#).await;
        let client = GeminiClient::new(local_client(), "", "key").unwrap().with_base_url(&base_url);

        let result = client.enrich("cat").await.unwrap();
        assert!(result.is_empty());
    }
}
