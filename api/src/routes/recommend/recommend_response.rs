use recommender::EnrichedItem;
use serde::Serialize;

/// Success payload of both recommendation routes.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub count: usize,
    pub items: Vec<EnrichedItem>,
}

impl From<Vec<EnrichedItem>> for RecommendResponse {
    fn from(items: Vec<EnrichedItem>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
