//! Command-line surface for discovery feeds and template generation.
//!
//! Template settings are collected as optional overrides so a config file can
//! sit between the built-in defaults and explicit flags.
use crate::config::ConfigOverrides;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Snapshot read when `--catalog` is not given.
pub const DEFAULT_CATALOG: &str = "pdh-catalog.json";

#[derive(Parser, Debug)]
#[command(
    name = "pdh2zbx",
    version,
    about = "Zabbix templates and low-level discovery for Windows performance counters",
    after_help = "Examples:\n  pdh2zbx --catalog host.json \"Network Interface\"\n  pdh2zbx --catalog host.txt --mode template -o pdh.xml Memory Process\n\nExit codes (discovery): 1 unknown category, 2 not exactly one category, 3 not multi-instance"
)]
pub struct Cli {
    /// Output kind
    #[arg(short, long, value_enum, default_value = "discovery")]
    pub mode: Mode,

    /// Counter catalog snapshot (.json catalog or typeperf -qx listing)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,

    /// JSON file with template settings; flags take precedence
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Template destination, or "stdout" [default: stdout]
    #[arg(short, long, value_name = "TARGET")]
    pub output: Option<String>,

    /// Host group the template belongs to [default: Templates]
    #[arg(long, value_name = "NAME")]
    pub host_group: Option<String>,

    /// Template name [default: "Template PDH Windows"]
    #[arg(long, value_name = "NAME")]
    pub template_name: Option<String>,

    /// Create items and item prototypes enabled
    #[arg(long)]
    pub enable_items: bool,

    /// Item polling interval in seconds [default: 60]
    #[arg(long, value_name = "SECONDS")]
    pub check_interval: Option<u32>,

    /// Discovery rule interval in seconds [default: 3600]
    #[arg(long, value_name = "SECONDS")]
    pub discovery_interval: Option<u32>,

    /// History retention in days [default: 90]
    #[arg(long, value_name = "DAYS")]
    pub history: Option<u32>,

    /// Trend retention in days [default: 365]
    #[arg(long, value_name = "DAYS")]
    pub trends: Option<u32>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Counter category names
    #[arg(value_name = "CATEGORY")]
    pub categories: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// LLD JSON for one multi-instance category
    Discovery,
    /// Zabbix XML template for one or more categories
    Template,
}

impl Cli {
    /// Template settings given explicitly on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            template_name: self.template_name.clone(),
            host_group: self.host_group.clone(),
            output: self.output.clone(),
            enable_items: self.enable_items.then_some(true),
            check_interval: self.check_interval,
            discovery_interval: self.discovery_interval,
            history_days: self.history,
            trend_days: self.trends,
        }
    }
}
