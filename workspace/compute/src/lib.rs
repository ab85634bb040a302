//! Computational pieces of the catalog service: the one-shot CSV
//! ingestion job (parsing, coercion, imputation, upsert) and the
//! per-category sales summary.

pub mod error;
pub mod ingest;
pub mod report;

pub use error::{ComputeError, Result};
