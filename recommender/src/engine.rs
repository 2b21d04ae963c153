//! Recommendation orchestrator.
//!
//! Each entry point turns its inputs into an ordered [`Strategy`] plan, runs
//! the plan until a strategy yields items, truncates to the configured limit
//! and enriches the result with vendor name and distance.

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::config::RecommenderConfig;
use crate::enrich::enrich_items;
use crate::error::RecommendError;
use crate::geo;
use crate::model::{EnrichedItem, GeoPoint, MenuItem, VendorDistance};
use crate::ranking::RankingClient;
use crate::sources::{MenuCatalog, TextModel, VendorDirectory};
use crate::strategies::{self, Strategy};

/// Recommendation engine with injected collaborators. Cheap to share behind `Arc`.
pub struct Recommender {
    catalog: Arc<dyn MenuCatalog>,
    vendors: Arc<dyn VendorDirectory>,
    ranking: RankingClient,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn MenuCatalog>,
        vendors: Arc<dyn VendorDirectory>,
        model: Arc<dyn TextModel>,
        config: RecommenderConfig,
    ) -> Self {
        let ranking = RankingClient::new(model).with_timeout(config.ranking_timeout);
        Self {
            catalog,
            vendors,
            ranking,
            config,
        }
    }

    /// Chat-style recommendation.
    ///
    /// `message` and `meal_type` may be absent, but not present-and-blank.
    /// Without a message the text model is always consulted.
    ///
    /// # Errors
    /// - [`RecommendError::InvalidInput`] for blank fields.
    /// - [`RecommendError::Catalog`] if the menu cannot be listed.
    #[instrument(skip_all, fields(has_message = message.is_some(), meal_type = meal_type, has_location = location.is_some()))]
    pub async fn recommend_by_chat(
        &self,
        message: Option<&str>,
        meal_type: Option<&str>,
        location: Option<GeoPoint>,
    ) -> Result<Vec<EnrichedItem>, RecommendError> {
        let message = require_non_blank("message", message)?;
        let meal_type = require_non_blank("meal_type", meal_type)?;
        let plan = chat_plan(message, meal_type);
        self.execute(plan, location).await
    }

    /// Query-parameter recommendation. Blank parameters are treated as absent.
    ///
    /// # Errors
    /// [`RecommendError::Catalog`] if the menu cannot be listed.
    #[instrument(skip_all, fields(query = query, meal_type = meal_type, has_location = location.is_some()))]
    pub async fn recommend_by_query(
        &self,
        query: Option<&str>,
        meal_type: Option<&str>,
        location: Option<GeoPoint>,
    ) -> Result<Vec<EnrichedItem>, RecommendError> {
        let plan = query_plan(non_blank(query), non_blank(meal_type));
        self.execute(plan, location).await
    }

    /// Vendors with known coordinates, nearest first, at most `limit`.
    ///
    /// # Errors
    /// - [`RecommendError::InvalidInput`] for an invalid user location.
    /// - [`RecommendError::VendorDirectory`] if vendors cannot be listed.
    #[instrument(skip_all, fields(lat = location.latitude, lng = location.longitude))]
    pub async fn nearby_vendors(
        &self,
        location: GeoPoint,
    ) -> Result<Vec<VendorDistance>, RecommendError> {
        geo::validate(&location).map_err(|e| RecommendError::InvalidInput(e.to_string()))?;

        let vendors = self
            .vendors
            .list_vendors()
            .await
            .map_err(RecommendError::VendorDirectory)?;
        let total = vendors.len();

        let mut located: Vec<VendorDistance> = vendors
            .into_iter()
            .filter_map(|vendor| {
                let at = vendor.location()?;
                match geo::distance_km(&location, &at) {
                    Ok(distance_km) => Some(VendorDistance { vendor, distance_km }),
                    Err(err) => {
                        warn!(vendor_id = %vendor.id, error = %err, "vendor skipped");
                        None
                    }
                }
            })
            .collect();

        located.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        located.truncate(self.config.limit);

        info!(vendors = total, returned = located.len(), "nearby vendors computed");
        Ok(located)
    }

    async fn execute(
        &self,
        plan: Vec<Strategy>,
        location: Option<GeoPoint>,
    ) -> Result<Vec<EnrichedItem>, RecommendError> {
        let menu = self
            .catalog
            .list_menu_items()
            .await
            .map_err(RecommendError::Catalog)?;

        let mut rng = self.config.rng.make_rng();
        let mut selected = self.run_plan(&plan, &menu, &mut rng).await;
        selected.truncate(self.config.limit);

        let enriched = enrich_items(
            selected,
            location,
            self.vendors.as_ref(),
            self.config.enrich_concurrency,
        )
        .await;

        info!(menu_items = menu.len(), returned = enriched.len(), "recommendation completed");
        Ok(enriched)
    }

    /// Runs strategies in order; the first non-empty result wins.
    async fn run_plan(
        &self,
        plan: &[Strategy],
        menu: &[MenuItem],
        rng: &mut StdRng,
    ) -> Vec<MenuItem> {
        let limit = self.config.limit;
        for strategy in plan {
            let items = match strategy {
                Strategy::Lexical { query } => strategies::lexical_match(query, menu, limit),
                Strategy::MealType { meal_type } => {
                    strategies::meal_type_filter(meal_type, menu, limit, rng)
                }
                Strategy::RandomSample => strategies::random_sample(menu, limit, rng),
                Strategy::RankingModel { query, meal_type } => {
                    self.ranking
                        .rank_menu(menu, query.as_deref(), meal_type.as_deref())
                        .await
                }
            };
            debug!(strategy = strategy.name(), items = items.len(), "strategy evaluated");
            if !items.is_empty() {
                return items;
            }
        }
        Vec::new()
    }
}

/// Plan for chat-style requests.
pub fn chat_plan(message: Option<&str>, meal_type: Option<&str>) -> Vec<Strategy> {
    let meal_type = meal_type.map(str::to_string);
    match message {
        Some(message) => vec![
            Strategy::Lexical {
                query: message.to_string(),
            },
            Strategy::RankingModel {
                query: Some(message.to_string()),
                meal_type,
            },
        ],
        None => vec![Strategy::RankingModel {
            query: None,
            meal_type,
        }],
    }
}

/// Plan for query-parameter requests.
pub fn query_plan(query: Option<&str>, meal_type: Option<&str>) -> Vec<Strategy> {
    match (query, meal_type) {
        (Some(query), meal_type) => vec![
            Strategy::Lexical {
                query: query.to_string(),
            },
            Strategy::RankingModel {
                query: Some(query.to_string()),
                meal_type: meal_type.map(str::to_string),
            },
        ],
        (None, Some(meal_type)) => vec![
            Strategy::MealType {
                meal_type: meal_type.to_string(),
            },
            Strategy::RandomSample,
        ],
        (None, None) => vec![Strategy::RandomSample],
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require_non_blank<'a>(
    field: &str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, RecommendError> {
    match value.map(str::trim) {
        Some("") => Err(RecommendError::InvalidInput(format!("{field} must not be blank"))),
        other => Ok(other),
    }
}
