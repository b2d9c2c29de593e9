//! Read-only queries over the loaded dataset

use serde::{Deserialize, Serialize};

use crate::types::Record;

pub mod executor;

pub use executor::TableQueryService;

/// Largest `k` a ranking query may ask for, whatever the configured limit
pub const MAX_K: usize = 31;

/// Defaults and bounds applied to incoming query parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryLimits {
    pub default_threshold: f64,
    pub default_k: usize,
    pub max_k: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_threshold: 33.0,
            default_k: 5,
            max_k: MAX_K,
        }
    }
}

/// Query string for `/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Query string for `/top-heat-days`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopHeatDaysParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

/// Dataset coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub row_count: usize,
    pub years: Vec<i32>,
}

/// Statistics over a year (or the whole table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub year: Option<i32>,
    pub n_days: usize,
    pub heatwave_days: usize,
    pub threshold: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Hottest days, descending by `max_temp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHeatDays {
    pub year: Option<i32>,
    pub k: usize,
    pub data: Vec<Record>,
}
