//! Fake data generation helpers.
//!
//! Wraps a seeded RNG and hands out names, cities, money amounts and dates.
//! Names and cities come from the `fake` crate so they follow the chosen locale.

use crate::schema::{round_money, ValueRange};
use chrono::{Days, NaiveDate};
use fake::faker::address::raw::CityName;
use fake::faker::name::raw::Name;
use fake::locales::{EN, PT_BR};
use fake::Fake;
use rand::Rng;

/// Locale used for person and city names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    En,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pt_br" | "pt" => Ok(Locale::PtBr),
            "en" | "en_us" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}. Use pt_br or en", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt_br"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
    locale: Locale,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R, locale: Locale) -> Self {
        Self { rng, locale }
    }

    /// Generate a full person name
    pub fn full_name(&mut self) -> String {
        match self.locale {
            Locale::PtBr => Name(PT_BR).fake_with_rng(&mut self.rng),
            Locale::En => Name(EN).fake_with_rng(&mut self.rng),
        }
    }

    /// Generate a city name
    pub fn city(&mut self) -> String {
        match self.locale {
            Locale::PtBr => CityName(PT_BR).fake_with_rng(&mut self.rng),
            Locale::En => CityName(EN).fake_with_rng(&mut self.rng),
        }
    }

    /// Generate a price uniformly in `range`, rounded to cents
    pub fn price(&mut self, range: ValueRange<f64>) -> f64 {
        let value = self.rng.random_range(range.min..=range.max);
        round_money(value).clamp(range.min, range.max)
    }

    /// Generate a random integer in an inclusive range
    pub fn int_range(&mut self, range: ValueRange<i64>) -> i64 {
        self.rng.random_range(range.min..=range.max)
    }

    /// Generate a random unsigned integer in `min..=max`
    pub fn uint(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// Generate a date uniformly in `start..=end`
    pub fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0) as u64;
        let offset = self.rng.random_range(0..=span);
        start.checked_add_days(Days::new(offset)).unwrap_or(end)
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Pick a random id from a non-empty id pool
    pub fn pick_id(&mut self, ids: &[i64]) -> i64 {
        *self.pick(ids)
    }
}
