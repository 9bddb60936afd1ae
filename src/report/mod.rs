//! Console reporting for a generated dataset.
//!
//! The text report lists row counts, a few orders joined with their customer
//! and product, and the leading rows of each table. The JSON summary carries
//! the same counts and joins for scripts.

use retail_data_gen::{Dataset, Relationship, TableData};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Orders shown in the relationship section
pub const RELATIONSHIP_EXAMPLES: usize = 3;
/// Leading rows shown per table
pub const PREVIEW_ROWS: usize = 3;
/// Sales targets span several categories per month, so show more of them
pub const TARGET_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub output: String,
    pub seed: u64,
    pub generated_on: String,
    pub tables: Vec<TableCount>,
    pub relationships: Vec<RelationshipJson>,
}

#[derive(Debug, Serialize)]
pub struct TableCount {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct RelationshipJson {
    pub order_id: i64,
    pub customer: String,
    pub city: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub total_value: f64,
    pub date: String,
}

impl From<Relationship> for RelationshipJson {
    fn from(rel: Relationship) -> Self {
        Self {
            order_id: rel.order_id,
            customer: rel.customer_name,
            city: rel.customer_city,
            category: rel.category.to_string(),
            price: rel.price,
            quantity: rel.quantity,
            total_value: rel.total_value,
            date: rel.date.to_string(),
        }
    }
}

/// Build the machine-readable summary
pub fn json_summary(
    output: &Path,
    seed: u64,
    generated_on: &str,
    dataset: &Dataset,
) -> anyhow::Result<JsonSummary> {
    Ok(JsonSummary {
        output: output.display().to_string(),
        seed,
        generated_on: generated_on.to_string(),
        tables: dataset
            .row_counts()
            .into_iter()
            .map(|(name, rows)| TableCount {
                name: name.to_string(),
                rows,
            })
            .collect(),
        relationships: dataset
            .relationships(RELATIONSHIP_EXAMPLES)?
            .into_iter()
            .map(RelationshipJson::from)
            .collect(),
    })
}

/// Write the full text report
pub fn write_text_report<W: Write>(
    out: &mut W,
    output: &Path,
    seed: u64,
    dataset: &Dataset,
) -> anyhow::Result<()> {
    write_summary(out, output, seed, dataset)?;
    write_relationships(out, dataset, RELATIONSHIP_EXAMPLES)?;
    write_previews(out, dataset)?;
    Ok(())
}

pub fn write_summary<W: Write>(
    out: &mut W,
    output: &Path,
    seed: u64,
    dataset: &Dataset,
) -> std::io::Result<()> {
    writeln!(out, "✓ Created '{}'", output.display())?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Summary:")?;
    for (name, rows) in dataset.row_counts() {
        writeln!(out, "  - {:<14} {:>5} rows", name, rows)?;
    }
    Ok(())
}

pub fn write_relationships<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    limit: usize,
) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "Relationship examples:")?;
    for rel in dataset.relationships(limit)? {
        writeln!(out, "Order {}:", rel.order_id)?;
        writeln!(out, "  Customer: {} ({})", rel.customer_name, rel.customer_city)?;
        writeln!(out, "  Product: {} - R$ {:.2}", rel.category, rel.price)?;
        writeln!(
            out,
            "  Total: R$ {:.2} ({} units)",
            rel.total_value, rel.quantity
        )?;
        writeln!(out, "  Date: {}", rel.date)?;
        writeln!(out, "  ---")?;
    }
    Ok(())
}

pub fn write_previews<W: Write>(out: &mut W, dataset: &Dataset) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Leading rows per table:")?;
    for table in dataset.tables() {
        let rows = if table.name == "sales_targets" {
            TARGET_PREVIEW_ROWS
        } else {
            PREVIEW_ROWS
        };
        writeln!(out)?;
        writeln!(out, "{}:", table.name.to_uppercase())?;
        write_table_preview(out, &table, rows)?;
    }
    Ok(())
}

/// Render the first `limit` rows of `table` as aligned columns
pub fn write_table_preview<W: Write>(
    out: &mut W,
    table: &TableData,
    limit: usize,
) -> std::io::Result<()> {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|s| s.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, w)| pad(name, *w, false))
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end())?;
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "─".repeat(total))?;

    for (row, text) in table.rows.iter().zip(&cells) {
        let line: Vec<String> = row
            .iter()
            .zip(text)
            .zip(&widths)
            .map(|((cell, s), w)| pad(s, *w, cell.is_numeric()))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }

    if table.rows.len() > limit {
        writeln!(out, "... {} more rows", table.rows.len() - limit)?;
    }
    Ok(())
}

// `{:>w$}` counts chars, not display width; fine for the names and cities fake emits.
fn pad(s: &str, width: usize, right: bool) -> String {
    if right {
        format!("{:>width$}", s, width = width)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_data_gen::{CellValue, TableData};

    #[test]
    fn test_table_preview_alignment() {
        let table = TableData {
            name: "products".to_string(),
            columns: vec!["product_id".to_string(), "category".to_string()],
            rows: vec![
                vec![CellValue::Int(1), CellValue::Text("Home".to_string())],
                vec![CellValue::Int(22), CellValue::Text("Electronics".to_string())],
                vec![CellValue::Int(3), CellValue::Text("Beauty".to_string())],
            ],
        };

        let mut out = Vec::new();
        write_table_preview(&mut out, &table, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "product_id  category");
        assert_eq!(lines[2], "         1  Home");
        assert_eq!(lines[3], "        22  Electronics");
        assert_eq!(lines[4], "... 1 more rows");
    }
}
