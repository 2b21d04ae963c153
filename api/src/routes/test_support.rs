//! Shared fixtures for handler tests.

use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, LlmProvider, LlmService};
use axum::response::Response;
use recommender::{
    Dataset, Recommender, RecommenderConfig, RngSource, SourceError, TextModel,
    sources::SourceFuture,
};

use crate::core::app_state::AppState;

const DATASET: &str = r#"{
    "menu": [
        {"id":"1","title":"Veg Burger","availability":"lunch","rating":4.2,"vendor_id":"v1"},
        {"id":"2","title":"Paneer Tikka","availability":"dinner","rating":4.6,"vendor_id":"v2"},
        {"id":"3","title":"Masala Dosa","availability":"breakfast","rating":4.8,"vendor_id":"v3"}
    ],
    "vendors": [
        {"id":"v1","name":"Burger Barn","latitude":12.9716,"longitude":77.5946},
        {"id":"v2","name":"Tandoor House","latitude":12.99,"longitude":77.60},
        {"id":"v3","name":"Dosa Corner"}
    ]
}"#;

/// Text model answering every prompt with the same text.
struct CannedModel(String);

impl TextModel for CannedModel {
    fn complete<'a>(&'a self, _prompt: &'a str) -> SourceFuture<'a, String> {
        Box::pin(async move { Ok::<_, SourceError>(self.0.clone()) })
    }
}

/// App state over the fixture dataset, a canned model reply and an unreachable Ollama.
pub(crate) fn state_with_reply(reply: &str) -> Arc<AppState> {
    let (catalog, vendors) = Dataset::from_json(DATASET).unwrap().into_sources();
    let config = RecommenderConfig {
        rng: RngSource::Seeded(7),
        ..RecommenderConfig::default()
    };
    let recommender = Recommender::new(
        catalog,
        vendors,
        Arc::new(CannedModel(reply.to_string())),
        config,
    );

    let llm = LlmService::new(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: "llama3".into(),
        endpoint: "http://127.0.0.1:9".into(),
        api_key: None,
        max_tokens: None,
        temperature: None,
        timeout_secs: Some(2),
    })
    .unwrap();

    Arc::new(AppState::new(Arc::new(recommender), Arc::new(llm)))
}

pub(crate) async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
