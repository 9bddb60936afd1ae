//! Workbook export.
//!
//! Each table becomes one sheet: a header row with the column names followed
//! by the data rows. There is no index column.

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use retail_data_gen::{CellValue, Dataset, TableData};
use std::fs;
use std::path::Path;
use xlsxwriter::{DateTime, Format, Workbook};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "loja_dados_completos.xlsx";

/// Number format for date cells
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Destination for exported sheets
pub trait SheetWriter {
    /// Write one table as a named sheet
    fn write_sheet(&mut self, table: &TableData) -> anyhow::Result<()>;

    /// Flush and close the destination
    fn finish(self) -> anyhow::Result<()>
    where
        Self: Sized;
}

/// Writes sheets into a single `.xlsx` workbook
pub struct XlsxSheetWriter {
    workbook: Workbook,
    date_format: Format,
}

impl XlsxSheetWriter {
    /// Create the workbook, replacing any existing file at `path`
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let filename = path
            .to_str()
            .with_context(|| format!("output path is not valid UTF-8: {}", path.display()))?;
        let workbook = Workbook::new(filename)
            .map_err(|e| anyhow::anyhow!("creating workbook {}: {}", path.display(), e))?;

        let mut date_format = Format::new();
        date_format.set_num_format(DATE_FORMAT);

        Ok(Self {
            workbook,
            date_format,
        })
    }
}

impl SheetWriter for XlsxSheetWriter {
    fn write_sheet(&mut self, table: &TableData) -> anyhow::Result<()> {
        let xlsx_err = |e| sheet_error(&table.name, e);

        let mut sheet = self
            .workbook
            .add_worksheet(Some(table.name.as_str()))
            .map_err(xlsx_err)?;

        for (col, name) in table.columns.iter().enumerate() {
            sheet
                .write_string(0, col as u16, name, None)
                .map_err(xlsx_err)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let row_num = i as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Int(n) => sheet.write_number(row_num, col, *n as f64, None),
                    CellValue::Float(n) => sheet.write_number(row_num, col, *n, None),
                    CellValue::Text(s) => sheet.write_string(row_num, col, s, None),
                    CellValue::Date(d) => sheet.write_datetime(
                        row_num,
                        col,
                        &excel_date(*d),
                        Some(&self.date_format),
                    ),
                }
                .map_err(xlsx_err)?;
            }
        }

        Ok(())
    }

    fn finish(self) -> anyhow::Result<()> {
        self.workbook
            .close()
            .map_err(|e| anyhow::anyhow!("closing workbook: {}", e))
    }
}

fn excel_date(date: NaiveDate) -> DateTime {
    DateTime::new(
        date.year() as i16,
        date.month() as i8,
        date.day() as i8,
        0,
        0,
        0.0,
    )
}

fn sheet_error(name: &str, err: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("sheet {}: {}", name, err)
}

/// Collects sheets in memory
#[derive(Debug, Default)]
pub struct MemorySheetWriter {
    pub sheets: Vec<TableData>,
}

impl MemorySheetWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&TableData> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

impl SheetWriter for MemorySheetWriter {
    fn write_sheet(&mut self, table: &TableData) -> anyhow::Result<()> {
        if self.sheet(&table.name).is_some() {
            anyhow::bail!("duplicate sheet name: {}", table.name);
        }
        self.sheets.push(table.clone());
        Ok(())
    }

    fn finish(self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Write every table of `dataset` to `writer`, in export order.
///
/// Returns the number of sheets written.
pub fn export_dataset<W: SheetWriter>(dataset: &Dataset, writer: &mut W) -> anyhow::Result<usize> {
    let tables = dataset.tables();
    for table in &tables {
        writer
            .write_sheet(table)
            .with_context(|| format!("exporting table {}", table.name))?;
    }
    Ok(tables.len())
}

/// Export `dataset` to a new workbook at `path`
pub fn write_workbook(dataset: &Dataset, path: &Path) -> anyhow::Result<usize> {
    write_tables(&dataset.tables(), path)
}

/// Write `tables` as sheets of a workbook at `path`.
///
/// The workbook is built in a temporary file next to `path` and renamed over
/// it only once every sheet is written, so a failure leaves `path` untouched.
pub fn write_tables(tables: &[TableData], path: &Path) -> anyhow::Result<usize> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".retail-fixtures-")
        .suffix(".xlsx")
        .tempfile_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?
        .into_temp_path();

    {
        // xlsxwriter flushes on drop even after an error; that lands in `staging` only
        let mut writer = XlsxSheetWriter::create(&staging)?;
        for table in tables {
            writer
                .write_sheet(table)
                .with_context(|| format!("exporting table {}", table.name))?;
        }
        writer
            .finish()
            .with_context(|| format!("writing {}", path.display()))?;
    }

    staging
        .persist(path)
        .with_context(|| format!("moving workbook into place at {}", path.display()))?;
    Ok(tables.len())
}
