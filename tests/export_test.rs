//! Integration tests for workbook export.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use retail_data_gen::{CellValue, Generator, GeneratorConfig};
use retail_fixtures::export::{
    export_dataset, write_tables, write_workbook, MemorySheetWriter, SheetWriter,
};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn small_config() -> GeneratorConfig {
    GeneratorConfig {
        customers: 5,
        products: 3,
        orders: 10,
        months: 1,
        ..Default::default()
    }
}

fn int_at(cell: &CellValue) -> i64 {
    match cell {
        CellValue::Int(n) => *n,
        other => panic!("expected integer cell, got {:?}", other),
    }
}

#[test]
fn test_small_dataset_sheets() {
    let data = Generator::new(42, small_config()).generate().unwrap();
    let mut sheets = MemorySheetWriter::new();

    let written = export_dataset(&data, &mut sheets).unwrap();
    assert_eq!(written, 4);

    let names: Vec<&str> = sheets.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["customers", "products", "orders", "sales_targets"]);

    assert_eq!(sheets.sheet("customers").unwrap().len(), 5);
    assert_eq!(sheets.sheet("products").unwrap().len(), 3);
    assert_eq!(sheets.sheet("orders").unwrap().len(), 10);

    let targets = sheets.sheet("sales_targets").unwrap();
    assert_eq!(targets.len(), 5);
    let categories: HashSet<String> = targets.rows.iter().map(|r| r[1].to_string()).collect();
    assert_eq!(categories.len(), 5);
    for row in &targets.rows {
        assert_eq!(int_at(&row[2]), 1, "month");
    }

    // Every FK in the orders sheet resolves against the other sheets
    let ids = |name: &str| -> HashSet<i64> {
        sheets.sheet(name).unwrap().rows.iter().map(|r| int_at(&r[0])).collect()
    };
    let customer_ids = ids("customers");
    let product_ids = ids("products");
    for row in &sheets.sheet("orders").unwrap().rows {
        assert!(customer_ids.contains(&int_at(&row[1])));
        assert!(product_ids.contains(&int_at(&row[2])));
    }

    sheets.finish().unwrap();
}

#[test]
fn test_sheet_columns_have_no_index() {
    let data = Generator::new(1, small_config()).generate().unwrap();
    let mut sheets = MemorySheetWriter::new();
    export_dataset(&data, &mut sheets).unwrap();

    let orders = sheets.sheet("orders").unwrap();
    assert_eq!(
        orders.columns,
        [
            "order_id",
            "customer_id",
            "product_id",
            "date",
            "quantity",
            "total_value",
            "payment_method"
        ]
    );
    for sheet in &sheets.sheets {
        assert!(sheet.rows.iter().all(|r| r.len() == sheet.columns.len()));
    }
}

#[test]
fn test_duplicate_sheet_rejected() {
    let data = Generator::new(1, small_config()).generate().unwrap();
    let mut sheets = MemorySheetWriter::new();
    export_dataset(&data, &mut sheets).unwrap();

    let err = export_dataset(&data, &mut sheets).unwrap_err();
    assert!(format!("{:#}", err).contains("duplicate sheet name: customers"));
}

#[test]
fn test_write_workbook_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("loja.xlsx");
    let data = Generator::new(42, small_config()).generate().unwrap();

    let sheets = write_workbook(&data, &path).unwrap();
    assert_eq!(sheets, 4);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx files are zip archives");
}

#[test]
fn test_write_workbook_overwrites_and_creates_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("out.xlsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not a workbook").unwrap();

    let data = Generator::new(7, small_config()).generate().unwrap();
    write_workbook(&data, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let fresh = temp_dir.path().join("a").join("b").join("fresh.xlsx");
    write_workbook(&data, &fresh).unwrap();
    assert!(fresh.exists());
}

fn excel_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    (date - epoch).num_days() as f64
}

#[test]
fn test_workbook_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("loja.xlsx");
    let data = Generator::new(42, small_config()).generate().unwrap();
    write_workbook(&data, &path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        ["customers", "products", "orders", "sales_targets"]
    );

    for (name, rows) in [
        ("customers", 6),
        ("products", 4),
        ("orders", 11),
        ("sales_targets", 6),
    ] {
        let range = workbook.worksheet_range(name).unwrap();
        assert_eq!(range.height(), rows, "sheet {}", name);
    }

    let orders = workbook.worksheet_range("orders").unwrap();
    let header: Vec<String> = orders
        .rows()
        .next()
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        header,
        [
            "order_id",
            "customer_id",
            "product_id",
            "date",
            "quantity",
            "total_value",
            "payment_method"
        ]
    );

    for (i, order) in data.orders.iter().enumerate() {
        let row = i + 1;
        assert_eq!(
            orders.get((row, 0)),
            Some(&Data::Float(order.order_id as f64)),
            "order_id is the first column, no index before it"
        );
        assert_eq!(
            orders.get((row, 5)),
            Some(&Data::Float(order.total_value))
        );
        assert_eq!(
            orders.get((row, 6)),
            Some(&Data::String(order.payment_method.to_string()))
        );
        match orders.get((row, 3)) {
            Some(Data::DateTime(dt)) => assert_eq!(dt.as_f64(), excel_serial(order.date)),
            other => panic!("expected a date cell in row {}, got {:?}", row, other),
        }
    }

    let products = workbook.worksheet_range("products").unwrap();
    for (i, product) in data.products.iter().enumerate() {
        assert_eq!(products.get((i + 1, 2)), Some(&Data::Float(product.price)));
    }
}

#[test]
fn test_failed_export_keeps_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("loja.xlsx");
    let data = Generator::new(3, small_config()).generate().unwrap();
    write_workbook(&data, &path).unwrap();
    let before = fs::read(&path).unwrap();

    let tables = data.tables();
    let duplicated = vec![tables[0].clone(), tables[0].clone()];
    assert!(write_tables(&duplicated, &path).is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, ["loja.xlsx"], "no temporary workbook left behind");
}
