//! Zabbix 3.0 XML export schema, limited to what templates need.
//!
//! Every list is wrapped in its own element (`<items><item/>...</items>`), so
//! each one gets a wrapper struct holding the repeated child.
use serde::{Deserialize, Serialize};

pub const EXPORT_VERSION: &str = "3.0";

/// Item and discovery rule type "Zabbix agent".
pub const TYPE_ZABBIX_AGENT: u8 = 0;
/// Item value type "numeric (float)".
pub const VALUE_TYPE_FLOAT: u8 = 0;
/// Days a discovered entity is kept after it stops being reported.
pub const LOST_RESOURCE_LIFETIME: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZabbixExport {
    pub version: String,
    pub groups: Groups,
    pub templates: Templates,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groups {
    #[serde(default)]
    pub group: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub template: Vec<Template>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Technical name; Zabbix matches imports on this.
    pub template: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub groups: Groups,
    pub applications: Applications,
    pub items: Items,
    pub discovery_rules: DiscoveryRules,
    pub macros: Macros,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applications {
    #[serde(default)]
    pub application: Vec<Application>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    #[serde(default)]
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: u8,
    pub key: String,
    pub delay: u32,
    pub history: u32,
    pub trends: u32,
    pub status: u8,
    pub value_type: u8,
    #[serde(default)]
    pub description: String,
    pub applications: Applications,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRules {
    #[serde(default)]
    pub discovery_rule: Vec<DiscoveryRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRule {
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: u8,
    pub key: String,
    pub delay: u32,
    pub status: u8,
    pub lifetime: u32,
    #[serde(default)]
    pub description: String,
    pub item_prototypes: ItemPrototypes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrototypes {
    #[serde(default)]
    pub item_prototype: Vec<ItemPrototype>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrototype {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: u8,
    pub key: String,
    pub delay: u32,
    pub history: u32,
    pub trends: u32,
    pub status: u8,
    pub value_type: u8,
    #[serde(default)]
    pub description: String,
    pub application_prototypes: ApplicationPrototypes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPrototypes {
    #[serde(default)]
    pub application_prototype: Vec<Application>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default, rename = "macro")]
    pub entries: Vec<Macro>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    #[serde(rename = "macro")]
    pub name: String,
    pub value: String,
}
