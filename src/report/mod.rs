pub mod types;

pub use types::{Report, ReportVulnerability, ScanResult};
