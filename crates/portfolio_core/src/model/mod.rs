//! Value records shared by the derivation core and its callers.
//!
//! # Responsibility
//! - Define the raw input bundle (`ProjectFacts`) assembled from fact rows.
//! - Define the display-ready view records handed to the rendering layer.
//! - Normalize controlled vocabularies (phase, priority, size, health).
//!
//! # Invariants
//! - Every record is an immutable snapshot; nothing here holds mutable state.
//! - Display casing of vocabulary values is preserved verbatim.

pub mod facts;
pub mod view;
pub mod vocabulary;
