//! Retail demo dataset export.
//!
//! Generation lives in the `retail_data_gen` crate; this crate writes the
//! tables to an xlsx workbook and reports on them.

pub mod export;
pub mod report;
