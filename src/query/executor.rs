//! Query execution over an immutable [`Dataset`]

use std::sync::Arc;

use super::{HealthReport, QueryLimits, Summary, TopHeatDays, MAX_K};
use crate::dataset::Dataset;
use crate::types::Record;
use crate::{Error, Result};

/// Answers health, summary and ranking queries.
///
/// Holds the dataset behind an `Arc`; cloning the service is cheap and
/// every query is a pure read.
#[derive(Debug, Clone)]
pub struct TableQueryService {
    dataset: Arc<Dataset>,
    limits: QueryLimits,
}

impl TableQueryService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_limits(dataset, QueryLimits::default())
    }

    pub fn with_limits(dataset: Arc<Dataset>, limits: QueryLimits) -> Self {
        Self { dataset, limits }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            row_count: self.dataset.len(),
            years: self.dataset.years(),
        }
    }

    /// Mean/max/min and heatwave day count for `year` (or all rows).
    ///
    /// `threshold` defaults to the configured heatwave threshold.
    pub fn summary(&self, year: Option<i32>, threshold: Option<f64>) -> Result<Summary> {
        let threshold = threshold.unwrap_or(self.limits.default_threshold);
        if !threshold.is_finite() {
            return Err(Error::invalid_request("threshold must be a finite number"));
        }

        let rows = self.subset(year)?;
        if rows.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let n_days = rows.len();
        let heatwave_days = rows.iter().filter(|r| r.max_temp >= threshold).count();
        let sum: f64 = rows.iter().map(|r| r.max_temp).sum();
        let max = rows
            .iter()
            .map(|r| r.max_temp)
            .fold(f64::NEG_INFINITY, f64::max);
        let min = rows.iter().map(|r| r.max_temp).fold(f64::INFINITY, f64::min);

        Ok(Summary {
            year,
            n_days,
            heatwave_days,
            threshold,
            mean: sum / n_days as f64,
            max,
            min,
        })
    }

    /// The `k` hottest days for `year` (or all rows).
    ///
    /// Ties keep load order. `k` defaults to the configured value and must
    /// lie in `1..=max_k`, and never above [`MAX_K`].
    pub fn top_heat_days(&self, year: Option<i32>, k: Option<usize>) -> Result<TopHeatDays> {
        let max_k = self.limits.max_k.min(MAX_K);
        let k = k.unwrap_or(self.limits.default_k);
        if k == 0 || k > max_k {
            return Err(Error::invalid_request(format!(
                "k must be between 1 and {} (got {})",
                max_k, k
            )));
        }

        let mut rows = self.subset(year)?;
        // sort_by is stable, so equal temperatures stay in load order
        rows.sort_by(|a, b| b.max_temp.total_cmp(&a.max_temp));
        rows.truncate(k);

        Ok(TopHeatDays {
            year,
            k,
            data: rows.into_iter().cloned().collect(),
        })
    }

    fn subset(&self, year: Option<i32>) -> Result<Vec<&Record>> {
        let rows = self.dataset.select(year);
        match year {
            Some(y) if rows.is_empty() => Err(Error::YearNotFound(y)),
            _ => Ok(rows),
        }
    }
}
