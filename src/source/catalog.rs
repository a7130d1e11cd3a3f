use super::{CategoryType, Counter, CounterCategory, CounterSource};
use crate::error::{Error, Result};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// In-memory snapshot of the host's counter categories.
///
/// Category types are kept as the host reported them and only checked when a
/// category is opened, so one odd category does not poison the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CategoryRecord {
    pub(super) name: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(default)]
    pub(super) help: String,
    #[serde(default)]
    pub(super) counters: Vec<CounterRecord>,
    #[serde(default)]
    pub(super) instances: Vec<InstanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CounterRecord {
    pub(super) name: String,
    #[serde(default)]
    pub(super) help: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct InstanceRecord {
    pub(super) name: String,
    /// Empty means the instance exposes the category-level counters.
    #[serde(default)]
    pub(super) counters: Vec<CounterRecord>,
}

impl Catalog {
    pub(super) fn from_records(categories: Vec<CategoryRecord>) -> Self {
        Self { categories }
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parse counter catalog JSON")
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_path_listing_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Ok(super::paths::catalog_from_listing(&text))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn record(&self, name: &str) -> Result<&CategoryRecord> {
        self.categories
            .iter()
            .find(|record| record.name == name)
            .ok_or_else(|| Error::ValidationError(name.to_string()))
    }
}

fn to_counters(category: &str, records: &[CounterRecord]) -> Vec<Counter> {
    records
        .iter()
        .map(|record| Counter {
            category: category.to_string(),
            name: record.name.clone(),
            help: record.help.clone(),
        })
        .collect()
}

impl CounterSource for Catalog {
    fn category_exists(&self, name: &str) -> bool {
        self.categories.iter().any(|record| record.name == name)
    }

    fn open_category(&self, name: &str) -> Result<CounterCategory> {
        let record = self.record(name)?;
        Ok(CounterCategory {
            name: record.name.clone(),
            kind: CategoryType::parse(&record.name, &record.kind)?,
            help: record.help.clone(),
        })
    }

    fn counters(&self, category: &CounterCategory) -> Result<Vec<Counter>> {
        let record = self.record(&category.name)?;
        Ok(to_counters(&record.name, &record.counters))
    }

    fn instance_counters(
        &self,
        category: &CounterCategory,
        instance: &str,
    ) -> Result<Vec<Counter>> {
        let record = self.record(&category.name)?;
        let instance_record = record
            .instances
            .iter()
            .find(|candidate| candidate.name == instance)
            .ok_or_else(|| Error::UnknownInstance {
                category: record.name.clone(),
                instance: instance.to_string(),
            })?;
        let counters = if instance_record.counters.is_empty() {
            &record.counters
        } else {
            &instance_record.counters
        };
        Ok(to_counters(&record.name, counters))
    }

    fn instance_names(&self, category: &CounterCategory) -> Result<Vec<String>> {
        let record = self.record(&category.name)?;
        Ok(record
            .instances
            .iter()
            .map(|instance| instance.name.clone())
            .collect())
    }
}
