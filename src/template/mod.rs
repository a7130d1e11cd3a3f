//! Template construction from counter categories.
//!
//! [`TemplateBuilder`] accumulates typed records per category and only
//! assembles the export tree in [`TemplateBuilder::finish`], so tests can
//! compare structures instead of rendered XML.
use crate::config::TemplateConfig;
use crate::discovery::INSTANCE_MACRO;
use crate::error::{Error, Result};
use crate::source::{CategoryType, CounterCategory, CounterSource};

pub mod model;
mod render;

pub use render::render;

use model::{
    Application, ApplicationPrototypes, Applications, DiscoveryRule, DiscoveryRules, Group,
    Groups, Item, ItemPrototype, ItemPrototypes, Items, Macro, Macros, Template, Templates,
    ZabbixExport, EXPORT_VERSION, LOST_RESOURCE_LIFETIME, TYPE_ZABBIX_AGENT, VALUE_TYPE_FLOAT,
};

/// User macro recording how the template was produced.
pub const INVOCATION_MACRO: &str = "{$PDH_INVOCATION}";

/// Zabbix key parameters are wrapped in quotes with embedded quotes escaped.
fn quote_param(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

pub fn item_key(category: &str, counter: &str) -> String {
    format!("perf_counter[{}]", quote_param(&format!("\\{category}\\{counter}")))
}

pub fn prototype_key(category: &str, counter: &str) -> String {
    format!(
        "perf_counter[{}]",
        quote_param(&format!("\\{category}({INSTANCE_MACRO})\\{counter}"))
    )
}

pub fn discovery_key(category: &str) -> String {
    format!("pdh.discovery[{}]", quote_param(category))
}

/// Human-readable record of the invocation, stored as a template macro.
pub fn invocation_summary(config: &TemplateConfig, categories: &[String]) -> String {
    let quoted: Vec<String> = categories.iter().map(|name| quote_param(name)).collect();
    format!(
        "mode=template output={} template={} hostgroup={} categories={}",
        quote_param(&config.output),
        quote_param(&config.template_name),
        quote_param(&config.host_group),
        quoted.join(",")
    )
}

pub fn template_description(categories: &[String]) -> String {
    format!(
        "Windows performance counters generated by pdh2zbx for: {}",
        categories.join(", ")
    )
}

/// One discovery rule together with the prototypes it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DiscoveryEntry {
    rule: DiscoveryRule,
    prototypes: Vec<ItemPrototype>,
}

#[derive(Debug)]
pub struct TemplateBuilder<'a> {
    config: &'a TemplateConfig,
    categories: Vec<String>,
    applications: Vec<Application>,
    items: Vec<Item>,
    discoveries: Vec<DiscoveryEntry>,
    macros: Vec<Macro>,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(config: &'a TemplateConfig) -> Self {
        Self {
            config,
            categories: Vec::new(),
            applications: Vec::new(),
            items: Vec::new(),
            discoveries: Vec::new(),
            macros: Vec::new(),
        }
    }

    /// Append the application or discovery rule for one category.
    pub fn add_category(
        &mut self,
        source: &dyn CounterSource,
        category: &CounterCategory,
    ) -> Result<()> {
        match category.kind {
            CategoryType::SingleInstance => self.add_single_instance(source, category),
            CategoryType::MultiInstance => self.add_multi_instance(source, category),
        }
    }

    fn add_single_instance(
        &mut self,
        source: &dyn CounterSource,
        category: &CounterCategory,
    ) -> Result<()> {
        let counters = source.counters(category)?;
        let added = counters.len();
        self.categories.push(category.name.clone());
        self.applications.push(Application {
            name: category.name.clone(),
        });
        for counter in counters {
            self.items.push(Item {
                key: item_key(&counter.category, &counter.name),
                name: counter.name,
                item_type: TYPE_ZABBIX_AGENT,
                delay: self.config.check_interval,
                history: self.config.history_days,
                trends: self.config.trend_days,
                status: self.config.item_status(),
                value_type: VALUE_TYPE_FLOAT,
                description: counter.help,
                applications: Applications {
                    application: vec![Application {
                        name: category.name.clone(),
                    }],
                },
            });
        }
        tracing::debug!(category = %category.name, items = added, "added application");
        Ok(())
    }

    /// Prototypes come from the first instance only; counters that other
    /// instances expose but the first one lacks are not represented.
    fn add_multi_instance(
        &mut self,
        source: &dyn CounterSource,
        category: &CounterCategory,
    ) -> Result<()> {
        let instances = source.instance_names(category)?;
        let counters = match instances.first() {
            Some(representative) => source.instance_counters(category, representative)?,
            None => {
                tracing::warn!(
                    category = %category.name,
                    "category has no instances; discovery rule gets no item prototypes"
                );
                Vec::new()
            }
        };

        let prototypes = counters
            .into_iter()
            .map(|counter| ItemPrototype {
                name: format!("{} ({INSTANCE_MACRO})", counter.name),
                item_type: TYPE_ZABBIX_AGENT,
                key: prototype_key(&counter.category, &counter.name),
                delay: self.config.check_interval,
                history: self.config.history_days,
                trends: self.config.trend_days,
                status: self.config.item_status(),
                value_type: VALUE_TYPE_FLOAT,
                description: counter.help,
                application_prototypes: ApplicationPrototypes {
                    application_prototype: vec![Application {
                        name: category.name.clone(),
                    }],
                },
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            category = %category.name,
            prototypes = prototypes.len(),
            "added discovery rule"
        );

        self.categories.push(category.name.clone());
        self.discoveries.push(DiscoveryEntry {
            rule: DiscoveryRule {
                name: format!("{} Discovery", category.name),
                rule_type: TYPE_ZABBIX_AGENT,
                key: discovery_key(&category.name),
                delay: self.config.discovery_interval,
                status: self.config.item_status(),
                lifetime: LOST_RESOURCE_LIFETIME,
                description: category.help.clone(),
                item_prototypes: ItemPrototypes::default(),
            },
            prototypes,
        });
        Ok(())
    }

    pub fn add_macro(&mut self, name: &str, value: String) {
        self.macros.push(Macro {
            name: name.to_string(),
            value,
        });
    }

    pub fn finish(self) -> ZabbixExport {
        let config = self.config;
        let group = || Groups {
            group: vec![Group {
                name: config.host_group.clone(),
            }],
        };
        let discovery_rule = self
            .discoveries
            .into_iter()
            .map(|entry| DiscoveryRule {
                item_prototypes: ItemPrototypes {
                    item_prototype: entry.prototypes,
                },
                ..entry.rule
            })
            .collect();

        ZabbixExport {
            version: EXPORT_VERSION.to_string(),
            groups: group(),
            templates: Templates {
                template: vec![Template {
                    template: config.template_name.clone(),
                    name: config.template_name.clone(),
                    description: template_description(&self.categories),
                    groups: group(),
                    applications: Applications {
                        application: self.applications,
                    },
                    items: Items { item: self.items },
                    discovery_rules: DiscoveryRules { discovery_rule },
                    macros: Macros {
                        entries: self.macros,
                    },
                }],
            },
        }
    }
}

/// Validate every name up front, then build the template in input order.
pub fn build(
    source: &dyn CounterSource,
    names: &[String],
    config: &TemplateConfig,
) -> Result<ZabbixExport> {
    for name in names {
        if !source.category_exists(name) {
            return Err(Error::ValidationError(name.clone()));
        }
    }

    let mut builder = TemplateBuilder::new(config);
    for name in names {
        let category = source.open_category(name)?;
        builder.add_category(source, &category)?;
    }
    builder.add_macro(INVOCATION_MACRO, invocation_summary(config, names));
    Ok(builder.finish())
}
