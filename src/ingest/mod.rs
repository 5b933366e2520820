//! Dataset importers.
//!
//! Each importer reads a public argument-mining dataset and stores it as
//! domains, claim and premise ADUs, and premise-to-claim relationships.

pub mod args_me;
pub mod batch;
pub mod ibm;

use serde::Serialize;

pub use batch::{commit_in_batches, DEFAULT_BATCH_SIZE};

/// Counts of what an import stored and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub domains: usize,
    pub adus: usize,
    pub relationships: usize,
    /// Arguments or rows that could not be mapped and were left out.
    pub skipped: usize,
}
