//! Menu recommendation engine.
//!
//! Turns a free-text query or meal-type hint, plus an optional user location,
//! into a short ranked list of menu items annotated with vendor name and
//! distance. Selection falls back through lexical matching, meal-type
//! filtering, text-model ranking and random sampling.
//!
//! Collaborators (menu catalog, vendor directory, text model) are injected
//! through the traits in [`sources`].

pub mod config;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod model;
pub mod ranking;
pub mod sources;
pub mod strategies;

pub use config::{RecommenderConfig, RngSource};
pub use engine::Recommender;
pub use error::{RecommendError, RecommenderConfigError, SourceError};
pub use geo::GeoError;
pub use model::{EnrichedItem, GeoPoint, MenuItem, RankedCandidate, Vendor, VendorDistance};
pub use sources::memory::{Dataset, InMemoryCatalog, InMemoryVendorDirectory};
pub use sources::{MenuCatalog, TextModel, VendorDirectory};
pub use strategies::Strategy;
