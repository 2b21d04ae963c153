//! Ranking-model client.
//!
//! Builds a prompt over the menu, asks the text model for a JSON array of
//! `{id, relevance}` objects and parses whatever comes back. Model output is
//! untrusted free text: prose, code fences and partial garbage are tolerated,
//! and any failure yields an empty ranking instead of an error.

use std::{collections::HashSet, sync::Arc, time::Duration};

use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use crate::model::{MenuItem, RankedCandidate};
use crate::sources::TextModel;

/// Default upper bound for a single model call.
pub const DEFAULT_RANKING_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the ranking prompt.
///
/// `query` and `meal_type` are optional hints; with neither the model is asked
/// for a generic recommendation.
pub fn build_prompt(menu: &[MenuItem], query: Option<&str>, meal_type: Option<&str>) -> String {
    let catalog: Vec<Value> = menu
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "title": item.title,
                "description": item.description,
                "availability": item.availability,
                "rating": item.rating,
            })
        })
        .collect();

    let request = match (query, meal_type) {
        (Some(q), Some(m)) => format!("The user asked: \"{q}\". They want something for {m}."),
        (Some(q), None) => format!("The user asked: \"{q}\"."),
        (None, Some(m)) => format!("The user wants something for {m}."),
        (None, None) => "The user wants a general recommendation.".to_string(),
    };

    format!(
        "You rank menu items for a food ordering app.\n\
         {request}\n\n\
         Menu (JSON):\n{menu}\n\n\
         Respond with a JSON array only, most relevant first, for example:\n\
         [{{\"id\": \"<menu item id>\", \"relevance\": 0.9}}]\n\
         `relevance` is a number between 0 and 1. Use only ids from the menu.",
        menu = Value::Array(catalog),
    )
}

/// JSON arrays embedded in `text`, left to right.
///
/// Each `[` is tried as the start of one array value; parsing stops at the end
/// of that value, so trailing prose is ignored. Openings that do not start a
/// well-formed array are skipped. Nesting beyond serde_json's recursion limit
/// fails fast, which keeps bracket-heavy replies linear.
pub fn json_arrays(text: &str) -> impl Iterator<Item = Vec<Value>> + '_ {
    text.char_indices()
        .filter(|&(_, c)| c == '[')
        .filter_map(move |(start, _)| {
            serde_json::Deserializer::from_str(&text[start..])
                .into_iter::<Vec<Value>>()
                .next()?
                .ok()
        })
}

/// Converts parsed array elements into candidates, skipping unusable entries.
///
/// - `id`: string or integer
/// - `relevance`: number or numeric string, clamped to `[0, 1]`; missing → `0.0`
pub fn parse_candidates(values: &[Value]) -> Vec<RankedCandidate> {
    values
        .iter()
        .filter_map(|value| {
            let obj = value.as_object()?;
            let id = match obj.get("id")? {
                Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
                Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
                _ => return None,
            };
            let relevance = match obj.get("relevance") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|r| r.is_finite())
            .map_or(0.0, |r| r.clamp(0.0, 1.0) as f32);
            Some(RankedCandidate { id, relevance })
        })
        .collect()
}

/// Extracts the ranking from raw model output.
///
/// Uses the first well-formed JSON array that yields at least one candidate,
/// sorts it by relevance (descending, stable) and drops repeated ids.
pub fn parse_ranking(text: &str) -> Vec<RankedCandidate> {
    let Some(mut candidates) = json_arrays(text)
        .map(|values| parse_candidates(&values))
        .find(|candidates| !candidates.is_empty())
    else {
        return Vec::new();
    };

    candidates.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.id.clone()));
    candidates
}

/// Maps candidates back onto menu items in ranking order, dropping unknown ids.
pub fn resolve(candidates: &[RankedCandidate], menu: &[MenuItem]) -> Vec<MenuItem> {
    candidates
        .iter()
        .filter_map(|c| menu.iter().find(|item| item.id == c.id).cloned())
        .collect()
}

/// Fail-open client around a [`TextModel`].
#[derive(Clone)]
pub struct RankingClient {
    model: Arc<dyn TextModel>,
    timeout: Duration,
}

impl RankingClient {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            timeout: DEFAULT_RANKING_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends `prompt` and parses the reply.
    ///
    /// Transport errors, timeouts and unparseable replies all produce an empty list.
    #[instrument(skip_all, fields(prompt_len = prompt.len(), timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn rank(&self, prompt: &str) -> Vec<RankedCandidate> {
        let reply = match tokio::time::timeout(self.timeout, self.model.complete(prompt)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                warn!(error = %err, "text model call failed");
                return Vec::new();
            }
            Err(_) => {
                warn!("text model call timed out");
                return Vec::new();
            }
        };

        let ranked = parse_ranking(&reply);
        if ranked.is_empty() {
            debug!(reply_len = reply.len(), "no usable ranking in model reply");
        }
        info!(candidates = ranked.len(), "ranking parsed");
        ranked
    }

    /// Ranks `menu` for the given hints and returns the known items in ranking order.
    pub async fn rank_menu(
        &self,
        menu: &[MenuItem],
        query: Option<&str>,
        meal_type: Option<&str>,
    ) -> Vec<MenuItem> {
        if menu.is_empty() {
            return Vec::new();
        }
        let prompt = build_prompt(menu, query, meal_type);
        let ranked = self.rank(&prompt).await;
        resolve(&ranked, menu)
    }
}
