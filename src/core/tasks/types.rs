use crate::core::EnrichmentResult;

#[derive(Debug, Clone)]
pub enum TaskResult {
    DocumentLoaded { generation: u64, result: Result<String, String> },
    CardEnriched { deck_generation: u64, card_id: u32, result: Result<EnrichmentResult, String> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::DocumentLoaded { .. } => "document_loaded",
            TaskResult::CardEnriched { .. } => "card_enriched",
        }
    }
}
