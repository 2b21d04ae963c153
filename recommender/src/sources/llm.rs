use ai_llm_service::LlmService;

use super::{SourceFuture, TextModel};

/// System instruction sent with every ranking prompt.
const RANKING_SYSTEM: &str =
    "You are a food recommendation assistant. Reply with JSON only, no commentary.";

impl TextModel for LlmService {
    fn complete<'a>(&'a self, prompt: &'a str) -> SourceFuture<'a, String> {
        Box::pin(async move { Ok(self.generate(prompt, Some(RANKING_SYSTEM)).await?) })
    }
}
