//! In-memory daily temperature table
//!
//! A [`Dataset`] is built once at startup by concatenating every configured
//! CSV source in order, and is never mutated afterwards. Query code shares it
//! behind an `Arc` without locking.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::types::Record;
use crate::Result;

pub mod loader;

pub use loader::{parse_date, SourceReport};

/// Resolved options for loading CSV sources
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub sources: Vec<PathBuf>,
    pub date_column: String,
    pub max_temp_column: String,
    pub delimiter: u8,
}

/// Ordered, immutable collection of records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from already-parsed records, keeping their order
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load and concatenate every configured source.
    ///
    /// Fails on the first source that cannot be read or that lacks a
    /// required column.
    pub fn load(options: &LoadOptions) -> Result<Self> {
        let mut records = Vec::new();

        for path in &options.sources {
            let (mut loaded, report) = loader::load_source(path, options)?;
            tracing::info!(
                source = %path.display(),
                rows = report.rows_used,
                dropped_dates = report.dropped_dates,
                dropped_temps = report.dropped_temps,
                "Loaded source"
            );
            if report.dropped() > 0 {
                tracing::warn!(
                    source = %path.display(),
                    dropped = report.dropped(),
                    "Skipped rows with unparseable date or temperature"
                );
            }
            records.append(&mut loaded);
        }

        let dataset = Self { records };
        tracing::info!(
            rows = dataset.len(),
            years = ?dataset.years(),
            "Dataset ready"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present, ascending
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records matching `year`, or every record when `year` is `None`.
    /// Original order is preserved.
    pub fn select(&self, year: Option<i32>) -> Vec<&Record> {
        match year {
            None => self.records.iter().collect(),
            Some(y) => self.records.iter().filter(|r| r.year == y).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, d: u32, t: f64) -> Record {
        let date = NaiveDate::from_ymd_opt(y, 7, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Record::new(date, t)
    }

    #[test]
    fn test_years_are_sorted_and_distinct() {
        let dataset = Dataset::from_records(vec![
            record(2024, 1, 30.0),
            record(2021, 1, 29.0),
            record(2024, 2, 31.0),
            record(2022, 1, 33.0),
        ]);
        assert_eq!(dataset.years(), vec![2021, 2022, 2024]);
    }

    #[test]
    fn test_select_keeps_order() {
        let dataset = Dataset::from_records(vec![
            record(2022, 3, 30.0),
            record(2021, 1, 29.0),
            record(2022, 1, 31.0),
        ]);

        let selected = dataset.select(Some(2022));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].max_temp, 30.0);
        assert_eq!(selected[1].max_temp, 31.0);

        assert_eq!(dataset.select(None).len(), 3);
        assert!(dataset.select(Some(1999)).is_empty());
    }
}
