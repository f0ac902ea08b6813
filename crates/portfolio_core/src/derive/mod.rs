//! Pure derivation sub-services used by the summary assembler.
//!
//! # Responsibility
//! - Turn raw numbers and dates into display strings (`formatters`).
//! - Derive schedule, completion, budget and health figures.
//!
//! # Invariants
//! - Every function is total, deterministic and free of I/O.
//! - "Today" is always an argument; nothing here reads the wall clock.

pub mod budget;
pub mod completion;
pub mod formatters;
pub mod health;
pub mod temporal;
