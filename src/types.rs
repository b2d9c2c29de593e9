//! Core types for heatwave

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Item identifier used by the catalog routes
pub type ItemId = i64;

/// A single daily observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDateTime,
    /// Always `date.year()`
    pub year: i32,
    pub max_temp: f64,
}

impl Record {
    pub fn new(date: NaiveDateTime, max_temp: f64) -> Self {
        Self {
            date,
            year: date.year(),
            max_temp,
        }
    }
}

/// Catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
