//! CSV source loader

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ByteRecord;

use super::LoadOptions;
use crate::types::Record;
use crate::{Error, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

/// Row accounting for a single source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub dropped_dates: usize,
    pub dropped_temps: usize,
}

impl SourceReport {
    pub fn dropped(&self) -> usize {
        self.dropped_dates + self.dropped_temps
    }
}

/// Parse a date cell. Returns `None` for anything unrecognised.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_local())
}

fn parse_temp(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// A cell decoded as UTF-8; undecodable cells read as absent
fn cell(row: &ByteRecord, idx: usize) -> Option<&str> {
    row.get(idx).and_then(|raw| std::str::from_utf8(raw).ok())
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Load one CSV file into records, dropping rows whose date or temperature
/// cannot be parsed.
pub(crate) fn load_source(path: &Path, options: &LoadOptions) -> Result<(Vec<Record>, SourceReport)> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let date_idx = column_index(&headers, &options.date_column);
    let temp_idx = column_index(&headers, &options.max_temp_column);

    let (date_idx, temp_idx) = match (date_idx, temp_idx) {
        (Some(d), Some(t)) => (d, t),
        _ => {
            let missing = [
                (date_idx, &options.date_column),
                (temp_idx, &options.max_temp_column),
            ]
            .into_iter()
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, name)| name.clone())
            .collect();
            return Err(Error::MissingColumns {
                source_name: path.display().to_string(),
                missing,
            });
        }
    };

    let mut records = Vec::new();
    let mut report = SourceReport::default();
    let mut row = ByteRecord::new();

    // Only the two required cells are decoded, so stray bytes elsewhere
    // in a row do not fail the load.
    while reader.read_byte_record(&mut row)? {
        report.rows_read += 1;

        let Some(date) = cell(&row, date_idx).and_then(parse_date) else {
            report.dropped_dates += 1;
            tracing::debug!(
                source = %path.display(),
                line = report.rows_read + 1,
                value = %String::from_utf8_lossy(row.get(date_idx).unwrap_or_default()),
                "Dropping row with unparseable date"
            );
            continue;
        };

        let Some(max_temp) = cell(&row, temp_idx).and_then(parse_temp) else {
            report.dropped_temps += 1;
            tracing::debug!(
                source = %path.display(),
                line = report.rows_read + 1,
                value = %String::from_utf8_lossy(row.get(temp_idx).unwrap_or_default()),
                "Dropping row with missing temperature"
            );
            continue;
        };

        records.push(Record::new(date, max_temp));
    }

    report.rows_used = records.len();
    Ok((records, report))
}
