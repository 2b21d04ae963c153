use serde::Deserialize;

/// Request payload for `POST /recommend/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// Free-text message; absent means "recommend something".
    #[serde(default)]
    pub message: Option<String>,
    /// Meal-time hint such as `breakfast`.
    #[serde(default, alias = "mealType")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default, alias = "lon")]
    pub lng: Option<f64>,
}

/// Query string of `GET /recommend`.
///
/// Coordinates are kept as text so blank values can be treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    #[serde(default, alias = "mealType")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default, alias = "lon")]
    pub lng: Option<String>,
}
