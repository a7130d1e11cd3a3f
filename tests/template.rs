//! Template generation through the binary, checked by parsing the XML back.

mod common;

use common::{stderr, stdout, TestFixture};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Export {
    templates: Templates,
}

#[derive(Debug, Deserialize)]
struct Templates {
    template: Vec<Template>,
}

#[derive(Debug, Deserialize)]
struct Template {
    name: String,
    applications: Applications,
    items: Items,
    discovery_rules: DiscoveryRules,
    macros: Macros,
}

#[derive(Debug, Deserialize)]
struct Applications {
    #[serde(default)]
    application: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Items {
    #[serde(default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    name: String,
    delay: u32,
    status: u8,
    description: String,
}

#[derive(Debug, Deserialize)]
struct DiscoveryRules {
    #[serde(default)]
    discovery_rule: Vec<DiscoveryRule>,
}

#[derive(Debug, Deserialize)]
struct DiscoveryRule {
    name: String,
    delay: u32,
    status: u8,
    item_prototypes: ItemPrototypes,
}

#[derive(Debug, Deserialize)]
struct ItemPrototypes {
    #[serde(default)]
    item_prototype: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Macros {
    #[serde(rename = "macro")]
    entries: Vec<Macro>,
}

#[derive(Debug, Deserialize)]
struct Macro {
    value: String,
}

fn parse_template(xml: &str) -> Template {
    let mut export: Export = quick_xml::de::from_str(xml).expect("parse template XML");
    assert_eq!(export.templates.template.len(), 1);
    export.templates.template.remove(0)
}

#[test]
fn enabled_icmp_items_go_to_stdout() {
    let fixture = TestFixture::host();
    let output = fixture.run(&["--mode", "template", "--enable-items", "ICMP"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let template = parse_template(&stdout(&output));
    assert_eq!(template.name, "Template PDH Windows");
    assert_eq!(template.applications.application.len(), 1);
    assert_eq!(template.applications.application[0].name, "ICMP");
    assert_eq!(template.items.item.len(), 1);
    let item = &template.items.item[0];
    assert_eq!(item.name, "Messages/sec");
    assert_eq!(item.status, 0);
    assert_eq!(item.description, "help A");
    assert!(template.discovery_rules.discovery_rule.is_empty());
}

#[test]
fn disabled_process_rule_has_one_prototype() {
    let fixture = TestFixture::host();
    let output = fixture.run(&["--mode", "template", "Process"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let template = parse_template(&stdout(&output));
    let rules = &template.discovery_rules.discovery_rule;
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "Process Discovery");
    assert_eq!(rules[0].status, 1);
    assert_eq!(rules[0].delay, 3600);
    let prototypes = &rules[0].item_prototypes.item_prototype;
    assert_eq!(prototypes.len(), 1);
    assert_eq!(prototypes[0].name, "% Processor Time ({#PDHINSTANCE})");
    assert_eq!(prototypes[0].status, 1);
}

#[test]
fn writes_file_in_input_order_with_custom_settings() {
    let fixture = TestFixture::host();
    let target = fixture.path("pdh.xml");
    std::fs::write(&target, "stale").expect("seed output file");
    let target_arg = target.to_str().expect("utf-8 temp path");

    let output = fixture.run(&[
        "--mode",
        "template",
        "--output",
        target_arg,
        "--template-name",
        "Template Web Hosts",
        "--check-interval",
        "30",
        "--discovery-interval",
        "600",
        "Network Interface",
        "Memory",
        "Process",
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());

    let xml = std::fs::read_to_string(&target).expect("read template");
    let template = parse_template(&xml);
    assert_eq!(template.name, "Template Web Hosts");

    let rules: Vec<&str> = template
        .discovery_rules
        .discovery_rule
        .iter()
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(rules, vec!["Network Interface Discovery", "Process Discovery"]);
    assert!(template
        .discovery_rules
        .discovery_rule
        .iter()
        .all(|rule| rule.delay == 600));

    assert_eq!(template.applications.application[0].name, "Memory");
    assert_eq!(template.items.item.len(), 2);
    assert!(template.items.item.iter().all(|item| item.delay == 30));

    let invocation = &template.macros.entries[0].value;
    assert!(invocation.contains("mode=template"));
    assert!(invocation.contains(r#"categories="Network Interface","Memory","Process""#));
}

#[test]
fn config_file_sits_between_defaults_and_flags() {
    let fixture = TestFixture::host();
    let config = fixture.path("pdh2zbx.json");
    std::fs::write(&config, r#"{"enable_items": true, "check_interval": 120}"#)
        .expect("write config");
    let config_arg = config.to_str().expect("utf-8 temp path");

    let output = fixture.run(&[
        "--mode",
        "template",
        "--config",
        config_arg,
        "--check-interval",
        "45",
        "Memory",
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let template = parse_template(&stdout(&output));
    assert!(template.items.item.iter().all(|item| item.status == 0));
    assert!(template.items.item.iter().all(|item| item.delay == 45));
}

#[test]
fn options_after_categories_still_apply() {
    let fixture = TestFixture::host();
    let output = fixture.run(&["Memory", "--mode", "template", "ICMP", "-v"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let template = parse_template(&stdout(&output));
    let applications: Vec<&str> = template
        .applications
        .application
        .iter()
        .map(|app| app.name.as_str())
        .collect();
    assert_eq!(applications, vec!["Memory", "ICMP"]);
}

#[test]
fn first_missing_category_fails_validation() {
    let fixture = TestFixture::host();
    let output = fixture.run(&["--mode", "template", "Memory", "Paging File", "Nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let message = stderr(&output);
    assert!(message.contains("Paging File"), "{message}");
    assert!(!message.contains("Nope"), "{message}");
}

#[test]
fn unsupported_category_type_is_fatal() {
    let fixture = TestFixture::with_catalog(
        "host.json",
        r#"{"categories": [{"name": "Odd", "type": "GlobalInstance"}]}"#,
    );
    let output = fixture.run(&["--mode", "template", "Odd"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
}

#[test]
fn unwritable_output_exits_5() {
    let fixture = TestFixture::host();
    let target = fixture.path("missing-dir").join("pdh.xml");
    let output = fixture.run(&[
        "--mode",
        "template",
        "-o",
        target.to_str().expect("utf-8 temp path"),
        "Memory",
    ]);

    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn template_mode_requires_a_category() {
    let fixture = TestFixture::host();
    let output = fixture.run(&["--mode", "template"]);

    assert_eq!(output.status.code(), Some(7));
    assert!(output.stdout.is_empty());
}
