//! Retail dataset generator.
//!
//! Generates a deterministic (per seed), FK-consistent retail dataset:
//! customers, products, orders that reference both, and a month × category
//! grid of sales targets.
//!
//! # Example
//!
//! ```rust
//! use retail_data_gen::{Generator, GeneratorConfig};
//!
//! // Same seed, same data
//! let mut gen = Generator::new(42, GeneratorConfig::default());
//! let data = gen.generate().unwrap();
//!
//! for table in data.tables() {
//!     println!("{}: {} rows", table.name, table.len());
//! }
//! ```

pub mod fake;
pub mod generator;
pub mod schema;

pub use crate::fake::{FakeData, Locale};
pub use generator::{
    adjust_for_season, adjusted_target_range, Dataset, Generator, GeneratorConfig, Relationship,
    DEFAULT_CUSTOMERS, DEFAULT_MONTHS, DEFAULT_ORDERS, DEFAULT_PRODUCTS, ORDER_WINDOW_MONTHS,
};
pub use schema::{
    order_total, round_money, seasonal_factor, CellValue, Category, Customer, Gender, Order,
    PaymentMethod, Product, Record, Row, SalesTarget, TableData, ValueRange,
};
