//! Common transport-layer types shared between the compute crate and the
//! HTTP facade. The report row shape lives here so the aggregation code
//! and the download handler agree on the artifact layout without either
//! depending on the other.

mod report;

pub use report::{REPORT_COLUMNS, REPORT_FILE_NAME, ReportRow};
