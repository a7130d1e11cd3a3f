//! Low-level discovery feed for one multi-instance category.
use crate::error::{Error, Result};
use crate::source::{CategoryType, CounterSource};
use serde::{Deserialize, Serialize};

/// LLD macro the agent substitutes into item prototype keys.
pub const INSTANCE_MACRO: &str = "{#PDHINSTANCE}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFeed {
    pub data: Vec<DiscoveryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    #[serde(rename = "{#PDHINSTANCE}")]
    pub instance: String,
}

/// Check the target list and enumerate the single category's instances.
pub fn discover(source: &dyn CounterSource, targets: &[String]) -> Result<DiscoveryFeed> {
    let [name] = targets else {
        return Err(Error::TooManyTargets(targets.len()));
    };
    if !source.category_exists(name) {
        return Err(Error::ValidationError(name.clone()));
    }
    let category = source.open_category(name)?;
    if category.kind != CategoryType::MultiInstance {
        return Err(Error::NotDiscoverable(category.name));
    }

    let data: Vec<DiscoveryRecord> = source
        .instance_names(&category)?
        .into_iter()
        .map(|instance| DiscoveryRecord { instance })
        .collect();
    tracing::debug!(category = %category.name, instances = data.len(), "discovered instances");
    Ok(DiscoveryFeed { data })
}

pub fn encode(feed: &DiscoveryFeed) -> Result<String> {
    serde_json::to_string(feed).map_err(|err| Error::Encode {
        what: "discovery feed",
        message: err.to_string(),
    })
}
