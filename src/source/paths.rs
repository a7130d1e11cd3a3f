//! Catalog loading from counter path listings (`typeperf -qx` output).
use super::catalog::{CategoryRecord, CounterRecord, InstanceRecord};
use super::Catalog;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One `\\machine\category(instance)\counter` path split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterPath {
    pub category: String,
    pub instance: Option<String>,
    pub counter: String,
}

fn counter_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:\\\\[^\\]+)?\\(?P<category>[^\\()]+)(?:\((?P<instance>.*)\))?\\(?P<counter>[^\\]+)$",
        )
        .expect("regex for counter paths")
    })
}

pub fn parse_counter_path(line: &str) -> Option<CounterPath> {
    let caps = counter_path_regex().captures(line.trim())?;
    let category = caps.name("category")?.as_str().trim();
    let counter = caps.name("counter")?.as_str().trim();
    if category.is_empty() || counter.is_empty() {
        return None;
    }
    Some(CounterPath {
        category: category.to_string(),
        instance: caps.name("instance").map(|m| m.as_str().to_string()),
        counter: counter.to_string(),
    })
}

fn push_counter(counters: &mut Vec<CounterRecord>, name: &str) {
    if counters.iter().all(|existing| existing.name != name) {
        counters.push(CounterRecord {
            name: name.to_string(),
            help: String::new(),
        });
    }
}

/// Fold a listing into categories, keeping first-seen order everywhere.
///
/// The listing repeats every counter once per instance, so instances and
/// counters are deduplicated here. A `*` instance only marks the category as
/// multi-instance.
pub(super) fn catalog_from_listing(text: &str) -> Catalog {
    let mut records: Vec<CategoryRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(path) = parse_counter_path(trimmed) else {
            tracing::warn!(line = line_no + 1, text = trimmed, "skipping unparsable counter path");
            continue;
        };

        let slot = *index.entry(path.category.clone()).or_insert_with(|| {
            records.push(CategoryRecord {
                name: path.category.clone(),
                kind: "SingleInstance".to_string(),
                help: String::new(),
                counters: Vec::new(),
                instances: Vec::new(),
            });
            records.len() - 1
        });
        let record = &mut records[slot];
        push_counter(&mut record.counters, &path.counter);

        let Some(instance) = path.instance else {
            continue;
        };
        record.kind = "MultiInstance".to_string();
        if instance == "*" {
            continue;
        }
        match record.instances.iter().position(|item| item.name == instance) {
            Some(pos) => push_counter(&mut record.instances[pos].counters, &path.counter),
            None => {
                let mut created = InstanceRecord {
                    name: instance,
                    counters: Vec::new(),
                };
                push_counter(&mut created.counters, &path.counter);
                record.instances.push(created);
            }
        }
    }

    Catalog::from_records(records)
}
