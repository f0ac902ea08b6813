//! Dashboard use-case services.
//!
//! # Responsibility
//! - `summary_service`: pure assembly of views from one facts snapshot.
//! - `dashboard_service`: gather facts from a `FactSource`, then assemble.
//!
//! # Invariants
//! - The assembler is invoked at most once per load, after every read settled.

pub mod dashboard_service;
pub mod summary_service;
