use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};
use tracing::debug;

use crate::core::FlashdeckError;

const EXPORT_BASE_URL: &str = "https://docs.google.com/document/d";

pub fn http_client() -> Result<Client, FlashdeckError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| FlashdeckError::Custom(format!("HTTP client build failed: {e}")))
}

/// Plain-text export URL of a shared document.
pub fn document_export_url(document_id: &str) -> String {
    format!("{}/{}/export?format=txt", EXPORT_BASE_URL, document_id.trim())
}

pub async fn fetch_document(client: &Client, url: &str) -> Result<String, FlashdeckError> {
    debug!("Fetching document from {}", url);

    let resp = client.get(url).header(USER_AGENT, "flashdeck/0.1 (+reqwest)").send().await?;

    ensure_success(&resp)?;

    let text = resp.text().await?;
    debug!("Fetched {} bytes", text.len());
    Ok(text)
}

pub fn ensure_success(resp: &Response) -> Result<(), FlashdeckError> {
    if !resp.status().is_success() {
        return Err(FlashdeckError::Http {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
