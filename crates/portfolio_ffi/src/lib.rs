//! Flutter-facing bindings for the portfolio dashboard core.

pub mod api;
