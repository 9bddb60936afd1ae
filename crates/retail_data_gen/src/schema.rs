//! Record types, fixed value sets, and the generic table form.
//!
//! The four record types mirror the sheets of the exported workbook. Each one
//! converts into a [`TableData`] so exporters and previews never need to know
//! about the concrete record structs.

use chrono::NaiveDate;
use std::fmt;

/// Product category. Order matters: sales targets iterate categories in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Sports,
    Beauty,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Sports,
        Category::Beauty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
        }
    }

    /// Unit price range for products of this category
    pub fn price_range(&self) -> ValueRange<f64> {
        match self {
            Category::Electronics => ValueRange::new(500.0, 5000.0),
            Category::Clothing => ValueRange::new(50.0, 300.0),
            Category::Home | Category::Sports | Category::Beauty => ValueRange::new(30.0, 800.0),
        }
    }

    /// Base monthly sales target range, before seasonal adjustment
    pub fn target_range(&self) -> ValueRange<i64> {
        match self {
            Category::Electronics => ValueRange::new(50_000, 100_000),
            Category::Clothing => ValueRange::new(30_000, 80_000),
            Category::Home | Category::Sports | Category::Beauty => {
                ValueRange::new(20_000, 60_000)
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ValueRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Pix,
        PaymentMethod::Boleto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier applied to a base sales target for the given month.
///
/// November/December get the holiday bump, June/July the vacation bump.
/// Month numbers past 12 are not wrapped and get no adjustment.
pub fn seasonal_factor(month: u32) -> f64 {
    match month {
        11 | 12 => 1.3,
        6 | 7 => 1.2,
        _ => 1.0,
    }
}

/// Round a currency amount to cents
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Order total for a unit price and quantity, rounded to cents
pub fn order_total(price: f64, quantity: u32) -> f64 {
    round_money(price * quantity as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub city: String,
    pub gender: Gender,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: i64,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub date: NaiveDate,
    pub quantity: u32,
    pub total_value: f64,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesTarget {
    pub target_id: i64,
    pub category: Category,
    pub month: u32,
    pub year: i32,
    pub monthly_target: i64,
}

/// A single cell of a generated table
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{:.2}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A row of generated data
pub type Row = Vec<CellValue>;

/// Generated data for a single table, in export column order
#[derive(Debug, Clone)]
pub struct TableData {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        Self {
            name: R::TABLE.to_string(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(Record::to_row).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A record type that maps onto one sheet
pub trait Record {
    /// Sheet name
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn to_row(&self) -> Row;
}

impl Record for Customer {
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [&'static str] = &["customer_id", "name", "city", "gender", "age"];

    fn to_row(&self) -> Row {
        vec![
            CellValue::Int(self.customer_id),
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.city.clone()),
            CellValue::Text(self.gender.to_string()),
            CellValue::Int(self.age as i64),
        ]
    }
}

impl Record for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["product_id", "category", "price", "stock"];

    fn to_row(&self) -> Row {
        vec![
            CellValue::Int(self.product_id),
            CellValue::Text(self.category.to_string()),
            CellValue::Float(self.price),
            CellValue::Int(self.stock as i64),
        ]
    }
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "customer_id",
        "product_id",
        "date",
        "quantity",
        "total_value",
        "payment_method",
    ];

    fn to_row(&self) -> Row {
        vec![
            CellValue::Int(self.order_id),
            CellValue::Int(self.customer_id),
            CellValue::Int(self.product_id),
            CellValue::Date(self.date),
            CellValue::Int(self.quantity as i64),
            CellValue::Float(self.total_value),
            CellValue::Text(self.payment_method.to_string()),
        ]
    }
}

impl Record for SalesTarget {
    const TABLE: &'static str = "sales_targets";
    const COLUMNS: &'static [&'static str] =
        &["target_id", "category", "month", "year", "monthly_target"];

    fn to_row(&self) -> Row {
        vec![
            CellValue::Int(self.target_id),
            CellValue::Text(self.category.to_string()),
            CellValue::Int(self.month as i64),
            CellValue::Int(self.year as i64),
            CellValue::Int(self.monthly_target),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ranges_by_category() {
        assert_eq!(Category::Electronics.price_range(), ValueRange::new(500.0, 5000.0));
        assert_eq!(Category::Clothing.price_range(), ValueRange::new(50.0, 300.0));
        for category in [Category::Home, Category::Sports, Category::Beauty] {
            assert_eq!(category.price_range(), ValueRange::new(30.0, 800.0));
        }
    }

    #[test]
    fn test_target_ranges_by_category() {
        assert_eq!(
            Category::Electronics.target_range(),
            ValueRange::new(50_000, 100_000)
        );
        assert_eq!(
            Category::Clothing.target_range(),
            ValueRange::new(30_000, 80_000)
        );
        assert_eq!(Category::Beauty.target_range(), ValueRange::new(20_000, 60_000));
    }

    #[test]
    fn test_seasonal_factor() {
        assert_eq!(seasonal_factor(11), 1.3);
        assert_eq!(seasonal_factor(12), 1.3);
        assert_eq!(seasonal_factor(6), 1.2);
        assert_eq!(seasonal_factor(7), 1.2);
        for month in [1, 2, 3, 4, 5, 8, 9, 10, 13, 24] {
            assert_eq!(seasonal_factor(month), 1.0, "month {}", month);
        }
    }

    #[test]
    fn test_order_total_rounding() {
        assert_eq!(order_total(4999.99, 3), 14999.97);
        assert_eq!(order_total(19.99, 1), 19.99);
        assert_eq!(order_total(0.1, 3), 0.3);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("electronics".parse::<Category>(), Ok(Category::Electronics));
        assert_eq!("Beauty".parse::<Category>(), Ok(Category::Beauty));
        assert!("Toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_table_data_from_records() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let orders = vec![Order {
            order_id: 1,
            customer_id: 7,
            product_id: 2,
            date,
            quantity: 2,
            total_value: 59.8,
            payment_method: PaymentMethod::Pix,
        }];

        let table = TableData::from_records(&orders);
        assert_eq!(table.name, "orders");
        assert_eq!(table.columns.len(), table.rows[0].len());
        assert_eq!(table.columns[3], "date");
        assert_eq!(table.rows[0][3].to_string(), "2024-03-09");
        assert_eq!(table.rows[0][5].to_string(), "59.80");
        assert_eq!(table.rows[0][6], CellValue::Text("PIX".to_string()));
    }
}
