//! Data model shared by the catalog, the engine and the HTTP layer.

use serde::{Deserialize, Serialize};

/// A sellable product from the menu catalog.
///
/// Owned by the catalog; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Meal-time tag such as `breakfast`, `lunch` or `dinner`.
    #[serde(alias = "available_at", alias = "mealType", alias = "meal_type")]
    pub availability: String,
    #[serde(default)]
    pub rating: f32,
    /// Identifier of the owning vendor.
    #[serde(alias = "vendor", alias = "vendorId")]
    pub vendor_id: String,
}

/// A selling establishment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Vendor {
    /// Vendor location, if both coordinates are recorded.
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a point only when both coordinates are present.
    ///
    /// A half-specified location counts as no location.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    /// `true` when neither coordinate is zero.
    ///
    /// Enrichment only computes distances between truthy points; a zero
    /// coordinate is how upstream stores mark "unknown".
    pub fn is_truthy(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

/// Model-produced relevance for one menu item. Engine-internal.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub id: String,
    /// Relevance in `[0, 1]`.
    pub relevance: f32,
}

/// A menu item annotated for a specific user location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: MenuItem,
    /// Vendor display name, or the raw vendor reference when the lookup failed.
    pub vendor_name: String,
    /// Distance from the user in kilometers, rounded to 2 decimals.
    pub distance_km: Option<f64>,
}

/// A vendor with its distance from the user, as returned by the nearby search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorDistance {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub distance_km: f64,
}
