//! Fact-source contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the read-only rows the dashboard consumes per project.
//! - Keep SQL details behind the `FactSource` trait.
//!
//! # Invariants
//! - Fact sources never write.
//! - Absent rows are reported as `None`, transport failures as errors.

pub mod fact_source;
pub mod sqlite_fact_source;
