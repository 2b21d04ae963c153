use recommender::VendorDistance;
use serde::{Deserialize, Serialize};

/// Query string of `GET /vendors/nearby`. Both coordinates are required.
#[derive(Debug, Default, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default, alias = "lon")]
    pub lng: Option<String>,
}

/// Success payload of `GET /vendors/nearby`.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub count: usize,
    pub vendors: Vec<VendorDistance>,
}
