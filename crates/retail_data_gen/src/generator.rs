//! Data generator that produces the four retail tables.
//!
//! Customers and products are independent draws. Orders only ever pick ids
//! from the already generated customer and product tables, so every foreign
//! key resolves by construction. Sales targets are an independent
//! month × category grid.

use crate::fake::{FakeData, Locale};
use crate::schema::{
    order_total, seasonal_factor, Category, Customer, Gender, Order, PaymentMethod, Product,
    SalesTarget, TableData, ValueRange,
};
use anyhow::{bail, Context};
use chrono::{Datelike, Local, Months, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

pub const DEFAULT_CUSTOMERS: usize = 50;
pub const DEFAULT_PRODUCTS: usize = 30;
pub const DEFAULT_ORDERS: usize = 200;
pub const DEFAULT_MONTHS: u32 = 12;

/// How far back order dates reach from `today`
pub const ORDER_WINDOW_MONTHS: u32 = 6;

const AGE_RANGE: (u32, u32) = (18, 70);
const STOCK_RANGE: (u32, u32) = (0, 100);
const QUANTITY_RANGE: (u32, u32) = (1, 5);

/// Table sizes and calendar anchor for one run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// Number of months of sales targets, starting at month 1
    pub months: u32,
    pub locale: Locale,
    /// Upper bound for order dates; its year stamps every sales target
    pub today: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customers: DEFAULT_CUSTOMERS,
            products: DEFAULT_PRODUCTS,
            orders: DEFAULT_ORDERS,
            months: DEFAULT_MONTHS,
            locale: Locale::default(),
            today: Local::now().date_naive(),
        }
    }
}

impl GeneratorConfig {
    /// First day orders may fall on: `today` minus the order window, clamped to month end
    pub fn order_window_start(&self) -> NaiveDate {
        self.today
            .checked_sub_months(Months::new(ORDER_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// An order joined with its customer and product
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub order_id: i64,
    pub customer_name: String,
    pub customer_city: String,
    pub category: Category,
    pub price: f64,
    pub quantity: u32,
    pub total_value: f64,
    pub date: NaiveDate,
}

/// All generated tables. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub sales_targets: Vec<SalesTarget>,
}

impl Dataset {
    /// Tables in export order
    pub fn tables(&self) -> Vec<TableData> {
        vec![
            TableData::from_records(&self.customers),
            TableData::from_records(&self.products),
            TableData::from_records(&self.orders),
            TableData::from_records(&self.sales_targets),
        ]
    }

    /// `(table name, row count)` pairs in export order
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("customers", self.customers.len()),
            ("products", self.products.len()),
            ("orders", self.orders.len()),
            ("sales_targets", self.sales_targets.len()),
        ]
    }

    pub fn customer_index(&self) -> HashMap<i64, &Customer> {
        self.customers.iter().map(|c| (c.customer_id, c)).collect()
    }

    pub fn product_index(&self) -> HashMap<i64, &Product> {
        product_index(&self.products)
    }

    /// Join the first `limit` orders with their customer and product
    pub fn relationships(&self, limit: usize) -> anyhow::Result<Vec<Relationship>> {
        let customers = self.customer_index();
        let products = self.product_index();

        self.orders
            .iter()
            .take(limit)
            .map(|order| -> anyhow::Result<Relationship> {
                let customer = customers.get(&order.customer_id).with_context(|| {
                    format!(
                        "order {} references missing customer {}",
                        order.order_id, order.customer_id
                    )
                })?;
                let product = products.get(&order.product_id).with_context(|| {
                    format!(
                        "order {} references missing product {}",
                        order.order_id, order.product_id
                    )
                })?;
                Ok(Relationship {
                    order_id: order.order_id,
                    customer_name: customer.name.clone(),
                    customer_city: customer.city.clone(),
                    category: product.category,
                    price: product.price,
                    quantity: order.quantity,
                    total_value: order.total_value,
                    date: order.date,
                })
            })
            .collect()
    }
}

fn product_index(products: &[Product]) -> HashMap<i64, &Product> {
    products.iter().map(|p| (p.product_id, p)).collect()
}

/// Main data generator
pub struct Generator {
    config: GeneratorConfig,
    fake: FakeData<ChaCha8Rng>,
}

impl Generator {
    pub fn new(seed: u64, config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            fake: FakeData::new(rng, config.locale),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate all four tables in dependency order
    pub fn generate(&mut self) -> anyhow::Result<Dataset> {
        let customers = self.generate_customers(self.config.customers);
        let products = self.generate_products(self.config.products);
        let orders = self
            .generate_orders(&customers, &products, self.config.orders)
            .context("generating orders")?;
        let sales_targets = self.generate_sales_targets(self.config.months);

        Ok(Dataset {
            customers,
            products,
            orders,
            sales_targets,
        })
    }

    pub fn generate_customers(&mut self, count: usize) -> Vec<Customer> {
        (1..=count as i64)
            .map(|customer_id| Customer {
                customer_id,
                name: self.fake.full_name(),
                city: self.fake.city(),
                gender: *self.fake.pick(&Gender::ALL),
                age: self.fake.uint(AGE_RANGE.0, AGE_RANGE.1),
            })
            .collect()
    }

    pub fn generate_products(&mut self, count: usize) -> Vec<Product> {
        (1..=count as i64)
            .map(|product_id| {
                let category = *self.fake.pick(&Category::ALL);
                Product {
                    product_id,
                    category,
                    price: self.fake.price(category.price_range()),
                    stock: self.fake.uint(STOCK_RANGE.0, STOCK_RANGE.1),
                }
            })
            .collect()
    }

    /// Generate orders against existing customers and products.
    ///
    /// Ids are drawn with replacement, so one customer or product can appear
    /// in many orders. Fails if orders are requested but either table is empty.
    pub fn generate_orders(
        &mut self,
        customers: &[Customer],
        products: &[Product],
        count: usize,
    ) -> anyhow::Result<Vec<Order>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if customers.is_empty() {
            bail!("cannot generate {} orders without customers", count);
        }
        if products.is_empty() {
            bail!("cannot generate {} orders without products", count);
        }

        let customer_ids: Vec<i64> = customers.iter().map(|c| c.customer_id).collect();
        let product_ids: Vec<i64> = products.iter().map(|p| p.product_id).collect();
        let prices = product_index(products);

        let start = self.config.order_window_start();
        let today = self.config.today;

        let mut orders = Vec::with_capacity(count);
        for order_id in 1..=count as i64 {
            let customer_id = self.fake.pick_id(&customer_ids);
            let product_id = self.fake.pick_id(&product_ids);
            let product = prices
                .get(&product_id)
                .with_context(|| format!("no product with id {}", product_id))?;

            let quantity = self.fake.uint(QUANTITY_RANGE.0, QUANTITY_RANGE.1);
            let date = self.fake.date_between(start, today);
            let payment_method = *self.fake.pick(&PaymentMethod::ALL);

            orders.push(Order {
                order_id,
                customer_id,
                product_id,
                date,
                quantity,
                total_value: order_total(product.price, quantity),
                payment_method,
            });
        }

        Ok(orders)
    }

    /// One target per (month, category), month-major.
    ///
    /// Every row carries the current year; month numbers above 12 keep
    /// counting without rolling into the next year.
    pub fn generate_sales_targets(&mut self, months: u32) -> Vec<SalesTarget> {
        let year = self.config.today.year();
        let mut targets = Vec::with_capacity(months as usize * Category::ALL.len());

        for month in 1..=months {
            for category in Category::ALL {
                let base = self.fake.int_range(category.target_range());
                targets.push(SalesTarget {
                    target_id: targets.len() as i64 + 1,
                    category,
                    month,
                    year,
                    monthly_target: adjust_for_season(base, month),
                });
            }
        }

        targets
    }
}

/// Apply the seasonal factor and truncate to whole currency units
pub fn adjust_for_season(base: i64, month: u32) -> i64 {
    (base as f64 * seasonal_factor(month)) as i64
}

/// Range a seasonally adjusted target must fall in
pub fn adjusted_target_range(category: Category, month: u32) -> ValueRange<i64> {
    let base = category.target_range();
    ValueRange::new(
        adjust_for_season(base.min, month),
        adjust_for_season(base.max, month),
    )
}
