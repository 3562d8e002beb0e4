//! Deprecated PDF feature finder
//!
//! Scans PDF documents for entries that PDF 2.0 deprecates (`/ProcSet`,
//! `/CIDSet`, `/CharSet`, and `/Name` on fonts, images and forms), reports
//! the objects that carry them, and strips them using lopdf.
//!
//! - [`detect`]: one pass over the object table per feature
//! - [`remove`]: per-feature removal, including the page → font →
//!   descriptor walk used for `/CIDSet`
//! - [`batch`]: the directory-level driver used by the CLI

pub mod batch;
pub mod detect;
pub mod error;
pub mod feature;
pub mod model;
pub mod remove;
pub mod report;

#[cfg(test)]
mod test_support;

pub use batch::{run, RunConfig, RunContext, RunSummary};
pub use detect::{detect, FindingSet};
pub use error::DeprecatedError;
pub use feature::Feature;
pub use model::ObjectNumber;
pub use report::ScanReport;
