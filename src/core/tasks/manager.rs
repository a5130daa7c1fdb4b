use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use reqwest::Client;
use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::{
    core::{
        controller::{
            EnrichRequest,
            LoadRequest,
        },
        http::{
            fetch_document,
            http_client,
        },
        FlashdeckError,
    },
    enrichment::GeminiClient,
};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs network work off the UI thread; results are collected with `poll_results`.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    client: Client,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    waker: Option<Waker>,
}

impl TaskManager {
    pub fn new() -> Result<Self, FlashdeckError> {
        Self::with_client(http_client()?)
    }

    pub fn with_client(client: Client) -> Result<Self, FlashdeckError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, client, receiver, sender, waker: None })
    }

    /// Called after every result is sent, e.g. to request a repaint.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Client, Option<Waker>) {
        (self.sender.clone(), self.runtime.clone(), self.client.clone(), self.waker.clone())
    }

    pub fn load_document(&self, request: LoadRequest, url: String) {
        let (sender, runtime, client, waker) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { fetch_document(&client, &url).await.map_err(|e| e.to_string()) });

            debug!("Document request {} finished", request.generation);
            let _ = sender.send(TaskResult::DocumentLoaded { generation: request.generation, result });
            if let Some(wake) = waker {
                wake();
            }
        });
    }

    pub fn enrich_card(&self, request: EnrichRequest, model: String, api_key: String) {
        let (sender, runtime, client, waker) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let gemini = GeminiClient::new(client, &model, &api_key)?;
                gemini.enrich(&request.word).await
            });

            let _ = sender.send(TaskResult::CardEnriched {
                deck_generation: request.deck_generation,
                card_id: request.card_id,
                result: result.map_err(|e: FlashdeckError| e.to_string()),
            });
            if let Some(wake) = waker {
                wake();
            }
        });
    }
}
