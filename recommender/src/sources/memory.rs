//! In-memory collaborators backed by a JSON dataset file.
//!
//! Dataset shape:
//! ```json
//! { "menu": [ { "id": "1", "title": "Veg Burger", ... } ],
//!   "vendors": [ { "id": "v1", "name": "Burger Barn", "latitude": 12.9, ... } ] }
//! ```

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use serde::Deserialize;
use tracing::{info, warn};

use super::{MenuCatalog, SourceFuture, VendorDirectory};
use crate::error::SourceError;
use crate::model::{MenuItem, Vendor};

/// Parsed dataset file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default, alias = "menu_items", alias = "menus")]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

impl Dataset {
    /// Reads and parses the dataset at `path`.
    ///
    /// # Errors
    /// - [`SourceError::Io`] if the file cannot be read.
    /// - [`SourceError::Parse`] if it is not a valid dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let dataset = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            menu_items = dataset.menu.len(),
            vendors = dataset.vendors.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Splits the dataset into shareable collaborators.
    pub fn into_sources(self) -> (Arc<InMemoryCatalog>, Arc<InMemoryVendorDirectory>) {
        (
            Arc::new(InMemoryCatalog::new(self.menu)),
            Arc::new(InMemoryVendorDirectory::new(self.vendors)),
        )
    }
}

/// Menu catalog holding a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<MenuItem>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

impl MenuCatalog for InMemoryCatalog {
    fn list_menu_items(&self) -> SourceFuture<'_, Vec<MenuItem>> {
        let items = self.items.clone();
        Box::pin(async move { Ok(items) })
    }
}

/// Vendor directory indexed by id; listing keeps file order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVendorDirectory {
    vendors: Vec<Vendor>,
    by_id: HashMap<String, usize>,
}

impl InMemoryVendorDirectory {
    /// Builds the index. On duplicate ids the first vendor wins.
    pub fn new(vendors: Vec<Vendor>) -> Self {
        let mut by_id = HashMap::with_capacity(vendors.len());
        for (idx, vendor) in vendors.iter().enumerate() {
            if by_id.contains_key(&vendor.id) {
                warn!(vendor_id = %vendor.id, "duplicate vendor id ignored");
                continue;
            }
            by_id.insert(vendor.id.clone(), idx);
        }
        Self { vendors, by_id }
    }
}

impl VendorDirectory for InMemoryVendorDirectory {
    fn get_vendor<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<Vendor>> {
        let found = self.by_id.get(id).map(|&idx| self.vendors[idx].clone());
        Box::pin(async move { Ok(found) })
    }

    fn list_vendors(&self) -> SourceFuture<'_, Vec<Vendor>> {
        let vendors = self.vendors.clone();
        Box::pin(async move { Ok(vendors) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "menu": [
            {"id":"1","title":"Veg Burger","availability":"lunch","rating":4.2,"vendor_id":"v1"},
            {"id":"2","title":"Masala Dosa","description":"crispy","availability":"breakfast","rating":4.8,"vendor_id":"v2"}
        ],
        "vendors": [
            {"id":"v1","name":"Burger Barn","latitude":12.97,"longitude":77.59},
            {"id":"v2","name":"Dosa Corner"},
            {"id":"v1","name":"Shadowed"}
        ]
    }"#;

    #[tokio::test]
    async fn parses_dataset_and_serves_it() {
        let (catalog, vendors) = Dataset::from_json(SAMPLE).unwrap().into_sources();

        let menu = catalog.list_menu_items().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[1].description.as_deref(), Some("crispy"));

        let v1 = vendors.get_vendor("v1").await.unwrap().unwrap();
        assert_eq!(v1.name, "Burger Barn");
        assert!(v1.location().is_some());

        let v2 = vendors.get_vendor("v2").await.unwrap().unwrap();
        assert!(v2.location().is_none());

        assert!(vendors.get_vendor("nope").await.unwrap().is_none());
        assert_eq!(vendors.list_vendors().await.unwrap().len(), 3);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let ds = Dataset::from_json("{}").unwrap();
        assert!(ds.menu.is_empty() && ds.vendors.is_empty());
    }

    #[test]
    fn malformed_dataset_is_a_parse_error() {
        assert!(matches!(
            Dataset::from_json(r#"{"menu": 3}"#),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Dataset::load("/definitely/not/here.json"),
            Err(SourceError::Io(_))
        ));
    }
}
