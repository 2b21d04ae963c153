//! Collaborator interfaces consumed by the engine.
//!
//! Implementations are injected as `Arc<dyn …>` so that the engine never
//! knows whether data comes from a file, a database or a test fake.

use std::{future::Future, pin::Pin};

use crate::error::SourceError;
use crate::model::{MenuItem, Vendor};

pub mod llm;
pub mod memory;

/// Boxed future returned by collaborator methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Read-only menu catalog.
pub trait MenuCatalog: Send + Sync {
    /// Full menu in catalog order.
    fn list_menu_items(&self) -> SourceFuture<'_, Vec<MenuItem>>;
}

/// Read-only vendor directory.
pub trait VendorDirectory: Send + Sync {
    /// Vendor by identifier; `Ok(None)` when unknown.
    fn get_vendor<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<Vendor>>;

    /// All vendors, used by the nearby search.
    fn list_vendors(&self) -> SourceFuture<'_, Vec<Vendor>>;
}

/// External text-completion service.
pub trait TextModel: Send + Sync {
    /// Sends `prompt` and returns the unstructured reply.
    fn complete<'a>(&'a self, prompt: &'a str) -> SourceFuture<'a, String>;
}
