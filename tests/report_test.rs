//! Integration tests for the text report and JSON summary.

use retail_data_gen::{Generator, GeneratorConfig};
use retail_fixtures::report::{json_summary, write_text_report};
use std::path::Path;

fn dataset() -> retail_data_gen::Dataset {
    Generator::new(42, GeneratorConfig::default())
        .generate()
        .unwrap()
}

#[test]
fn test_text_report_sections() {
    let data = dataset();
    let mut out = Vec::new();
    write_text_report(&mut out, Path::new("loja.xlsx"), 42, &data).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("✓ Created 'loja.xlsx'"));
    assert!(text.contains("Seed: 42"));
    assert!(text.contains("customers         50 rows"));
    assert!(text.contains("products          30 rows"));
    assert!(text.contains("orders           200 rows"));
    assert!(text.contains("sales_targets     60 rows"));

    assert!(text.contains("Relationship examples:"));
    assert_eq!(text.matches("  Customer: ").count(), 3);
    let first = &data.customers[(data.orders[0].customer_id - 1) as usize];
    assert!(text.contains(&format!("  Customer: {} ({})", first.name, first.city)));

    assert!(text.contains("CUSTOMERS:"));
    assert!(text.contains("SALES_TARGETS:"));
    assert!(text.contains("... 50 more rows"), "sales targets preview shows 10 of 60");
    assert!(text.contains("... 197 more rows"), "orders preview shows 3 of 200");
}

#[test]
fn test_json_summary() {
    let data = dataset();
    let summary = json_summary(Path::new("out.xlsx"), 7, "2024-12-15", &data).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["output"], "out.xlsx");
    assert_eq!(json["seed"], 7);
    assert_eq!(json["generated_on"], "2024-12-15");

    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 4);
    assert_eq!(tables[2]["name"], "orders");
    assert_eq!(tables[2]["rows"], 200);

    let relationships = json["relationships"].as_array().unwrap();
    assert_eq!(relationships.len(), 3);
    assert_eq!(relationships[0]["order_id"], 1);
}
