//! Counter metadata as exposed by the host's performance-counter API.
//!
//! The live API only exists on Windows, so the rest of the crate talks to a
//! [`CounterSource`] and the binary feeds it a snapshot taken on the host:
//! either a JSON catalog or a `typeperf -qx` path listing.
use crate::error::{Error, Result};
use std::path::Path;

mod catalog;
mod paths;

pub use catalog::Catalog;

/// Whether a category reports one value per counter or one per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    SingleInstance,
    MultiInstance,
}

impl CategoryType {
    /// Map a host-reported type name onto the two kinds this tool supports.
    pub fn parse(category: &str, raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "singleinstance" | "single" => Ok(CategoryType::SingleInstance),
            "multiinstance" | "multi" => Ok(CategoryType::MultiInstance),
            _ => Err(Error::UnsupportedCategoryType {
                category: category.to_string(),
                kind: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterCategory {
    pub name: String,
    pub kind: CategoryType,
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub category: String,
    pub name: String,
    pub help: String,
}

/// Read-only view of the host's counter categories.
pub trait CounterSource {
    fn category_exists(&self, name: &str) -> bool;

    /// Fails with [`Error::ValidationError`] when the category is absent and
    /// [`Error::UnsupportedCategoryType`] when its type is neither kind.
    fn open_category(&self, name: &str) -> Result<CounterCategory>;

    /// Counters of a single-instance category.
    fn counters(&self, category: &CounterCategory) -> Result<Vec<Counter>>;

    /// Counters of a multi-instance category, scoped to one instance.
    fn instance_counters(&self, category: &CounterCategory, instance: &str)
        -> Result<Vec<Counter>>;

    /// Instance names of a multi-instance category, in host order.
    fn instance_names(&self, category: &CounterCategory) -> Result<Vec<String>>;
}

/// Load a snapshot, picking the format from the file extension.
pub fn load(path: &Path) -> Result<Catalog> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let loaded = if is_json {
        Catalog::from_json_file(path)
    } else {
        Catalog::from_path_listing_file(path)
    };
    let catalog = loaded.map_err(|source| Error::Source {
        path: path.to_path_buf(),
        source,
    })?;
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "counter catalog has no categories");
    }
    tracing::info!(
        path = %path.display(),
        categories = catalog.len(),
        "loaded counter catalog"
    );
    Ok(catalog)
}
