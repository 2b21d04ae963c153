//! Fake collaborators for engine tests.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use recommender::{
    MenuCatalog, MenuItem, Recommender, RecommenderConfig, RngSource, SourceError, TextModel,
    Vendor, VendorDirectory, sources::SourceFuture,
};

pub fn item(id: &str, title: &str, availability: &str, vendor_id: &str) -> MenuItem {
    MenuItem {
        id: id.into(),
        title: title.into(),
        description: None,
        availability: availability.into(),
        rating: 4.0,
        vendor_id: vendor_id.into(),
    }
}

pub fn vendor(id: &str, name: &str, at: Option<(f64, f64)>) -> Vendor {
    Vendor {
        id: id.into(),
        name: name.into(),
        latitude: at.map(|(lat, _)| lat),
        longitude: at.map(|(_, lng)| lng),
        address: None,
        phone: None,
        category: None,
    }
}

/// Catalog serving a fixed menu, or failing every call.
pub struct FakeCatalog {
    items: Option<Vec<MenuItem>>,
}

impl FakeCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items: Some(items) }
    }

    pub fn unavailable() -> Self {
        Self { items: None }
    }
}

impl MenuCatalog for FakeCatalog {
    fn list_menu_items(&self) -> SourceFuture<'_, Vec<MenuItem>> {
        Box::pin(async move {
            self.items
                .clone()
                .ok_or_else(|| SourceError::Unavailable("catalog offline".into()))
        })
    }
}

/// Vendor directory over a fixed list; ids in `failing` error on lookup.
#[derive(Default)]
pub struct FakeVendors {
    vendors: Vec<Vendor>,
    failing: Vec<String>,
}

impl FakeVendors {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self {
            vendors,
            failing: Vec::new(),
        }
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }
}

impl VendorDirectory for FakeVendors {
    fn get_vendor<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<Vendor>> {
        Box::pin(async move {
            if self.failing.iter().any(|f| f == id) {
                return Err(SourceError::Unavailable(format!("lookup of {id} failed")));
            }
            Ok(self.vendors.iter().find(|v| v.id == id).cloned())
        })
    }

    fn list_vendors(&self) -> SourceFuture<'_, Vec<Vendor>> {
        Box::pin(async move { Ok(self.vendors.clone()) })
    }
}

/// Text model with a fixed reply that records every prompt it receives.
pub struct FakeModel {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("connection refused".into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl TextModel for FakeModel {
    fn complete<'a>(&'a self, prompt: &'a str) -> SourceFuture<'a, String> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(SourceError::Unavailable)
        })
    }
}

pub fn seeded_config(seed: u64) -> RecommenderConfig {
    RecommenderConfig {
        rng: RngSource::Seeded(seed),
        ..RecommenderConfig::default()
    }
}

pub fn engine(
    catalog: FakeCatalog,
    vendors: FakeVendors,
    model: Arc<FakeModel>,
) -> Recommender {
    Recommender::new(
        Arc::new(catalog),
        Arc::new(vendors),
        model,
        seeded_config(11),
    )
}
