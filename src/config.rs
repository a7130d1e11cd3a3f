//! Template settings: built-in defaults, an optional JSON file, then flags.
//!
//! The merged [`TemplateConfig`] is passed explicitly through the builder so
//! nothing downstream reads process-wide state.
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Output target meaning "write to standard output".
pub const STDOUT_TARGET: &str = "stdout";
pub const DEFAULT_HOST_GROUP: &str = "Templates";
pub const DEFAULT_TEMPLATE_NAME: &str = "Template PDH Windows";
pub const DEFAULT_CHECK_INTERVAL: u32 = 60;
pub const DEFAULT_DISCOVERY_INTERVAL: u32 = 3600;
pub const DEFAULT_HISTORY_DAYS: u32 = 90;
pub const DEFAULT_TREND_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub template_name: String,
    pub host_group: String,
    pub output: String,
    pub enable_items: bool,
    pub check_interval: u32,
    pub discovery_interval: u32,
    pub history_days: u32,
    pub trend_days: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            host_group: DEFAULT_HOST_GROUP.to_string(),
            output: STDOUT_TARGET.to_string(),
            enable_items: false,
            check_interval: DEFAULT_CHECK_INTERVAL,
            discovery_interval: DEFAULT_DISCOVERY_INTERVAL,
            history_days: DEFAULT_HISTORY_DAYS,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl TemplateConfig {
    /// Zabbix status value for generated items: 0 enabled, 1 disabled.
    pub fn item_status(&self) -> u8 {
        u8::from(!self.enable_items)
    }

    /// Layer `overrides` on top of `self`, field by field.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            template_name,
            host_group,
            output,
            enable_items,
            check_interval,
            discovery_interval,
            history_days,
            trend_days,
        } = overrides;
        if let Some(value) = template_name {
            self.template_name = value;
        }
        if let Some(value) = host_group {
            self.host_group = value;
        }
        if let Some(value) = output {
            self.output = value;
        }
        if let Some(value) = enable_items {
            self.enable_items = value;
        }
        if let Some(value) = check_interval {
            self.check_interval = value;
        }
        if let Some(value) = discovery_interval {
            self.discovery_interval = value;
        }
        if let Some(value) = history_days {
            self.history_days = value;
        }
        if let Some(value) = trend_days {
            self.trend_days = value;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let checks = [
            ("check_interval", self.check_interval),
            ("discovery_interval", self.discovery_interval),
            ("history_days", self.history_days),
            ("trend_days", self.trend_days),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(anyhow!("{field} must be greater than zero"));
            }
        }
        if self.template_name.trim().is_empty() {
            return Err(anyhow!("template_name must not be empty"));
        }
        if self.host_group.trim().is_empty() {
            return Err(anyhow!("host_group must not be empty"));
        }
        Ok(())
    }
}

/// Partial settings, as read from a config file or collected from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub template_name: Option<String>,
    pub host_group: Option<String>,
    pub output: Option<String>,
    pub enable_items: Option<bool>,
    pub check_interval: Option<u32>,
    pub discovery_interval: Option<u32>,
    pub history_days: Option<u32>,
    pub trend_days: Option<u32>,
}

pub fn load_overrides(path: &Path) -> anyhow::Result<ConfigOverrides> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse config {}", path.display()))
}

/// Defaults, then the optional file, then flags; validated before use.
pub fn resolve(file: Option<&Path>, flags: ConfigOverrides) -> anyhow::Result<TemplateConfig> {
    let mut config = TemplateConfig::default();
    if let Some(path) = file {
        config.apply(load_overrides(path)?);
        tracing::debug!(path = %path.display(), "applied config file");
    }
    config.apply(flags);
    config.validate()?;
    Ok(config)
}
