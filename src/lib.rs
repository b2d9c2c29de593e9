//! Heatwave - a small HTTP API over daily maximum temperature tables
//!
//! Heatwave loads one or more CSV files into an immutable in-memory table at
//! startup and serves:
//! - Dataset coverage (`/health`)
//! - Per-year summary statistics with a heatwave threshold (`/summary`)
//! - Top-K hottest days (`/top-heat-days`)
//! - A small in-memory item catalog (`/items`) and `hello`/`echo` endpoints

pub mod api;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod query;
pub mod types;

pub use error::{Error, Result};
