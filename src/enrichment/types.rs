use serde::{
    Deserialize,
    Serialize,
};

use crate::core::EnrichmentResult;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }] }
    }
}

// Every level defaults so a sparse reply never fails to decode.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Text of the first part of the first candidate, or `""`.
pub fn extract_reply_text(response: &GenerateContentResponse) -> &str {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .unwrap_or("")
}

/// Splits a `pronunciation/english/vietnamese/` reply.
///
/// Pieces are trimmed and empty ones dropped before the first three are
/// assigned in order, so a leading slash or a missing tail is tolerated.
pub fn parse_enrichment_reply(text: &str) -> EnrichmentResult {
    let mut pieces = text.split('/').map(str::trim).filter(|piece| !piece.is_empty());

    let mut next = || pieces.next().unwrap_or_default().to_string();

    let pronunciation = next();
    let english_clause = next();
    let vietnamese_clause = next();

    EnrichmentResult { pronunciation, english_clause, vietnamese_clause }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_with_leading_slash() {
        let result = parse_enrichment_reply("/kæt/An example./Một ví dụ.");
        assert_eq!(result.pronunciation, "kæt");
        assert_eq!(result.english_clause, "An example.");
        assert_eq!(result.vietnamese_clause, "Một ví dụ.");
    }

    #[test]
    fn test_parse_reply_requested_format() {
        let result =
            parse_enrichment_reply(" /ˈæp.əl/ / I ate an apple. / Tôi đã ăn một quả táo. /\n");
        assert_eq!(result.pronunciation, "ˈæp.əl");
        assert_eq!(result.english_clause, "I ate an apple.");
        assert_eq!(result.vietnamese_clause, "Tôi đã ăn một quả táo.");
    }

    #[test]
    fn test_parse_reply_missing_pieces() {
        let result = parse_enrichment_reply("/dɒɡ/The dog barks.");
        assert_eq!(result.pronunciation, "dɒɡ");
        assert_eq!(result.english_clause, "The dog barks.");
        assert_eq!(result.vietnamese_clause, "");

        assert_eq!(parse_enrichment_reply(""), EnrichmentResult::default());
        assert_eq!(parse_enrichment_reply(" / // "), EnrichmentResult::default());
    }

    #[test]
    fn test_parse_reply_ignores_extra_pieces() {
        let result = parse_enrichment_reply("a/b/c/d/e");
        assert_eq!(result.pronunciation, "a");
        assert_eq!(result.english_clause, "b");
        assert_eq!(result.vietnamese_clause, "c");
    }

    #[test]
    fn test_extract_reply_text() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"/kæt/A cat./Một con mèo./"}],"role":"model"}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_reply_text(&response), "/kæt/A cat./Một con mèo./");
    }

    #[test]
    fn test_extract_reply_text_defaults_when_missing() {
        for json in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
            assert_eq!(extract_reply_text(&response), "", "for {json}");
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi".to_string()))
            .unwrap();
        assert_eq!(body, serde_json::json!({ "contents": [{ "parts": [{ "text": "hi" }] }] }));
    }
}
