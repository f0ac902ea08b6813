//! Project health and financial derivation core for the portfolio dashboard.
//! This crate is the single source of truth for dashboard business rules.

pub mod db;
pub mod derive;
pub mod logging;
pub mod model;
pub mod service;
pub mod source;

pub use derive::budget::{cost_breakdown, BudgetStatus};
pub use derive::completion::{completion_percent, has_milestones};
pub use derive::formatters::{
    format_currency_compact, format_currency_full, format_date, format_effort, format_percent,
};
pub use derive::health::{classify_health, HealthSignals};
pub use derive::temporal::{days_remaining, working_days};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::facts::{CostBreakdown, ProjectFacts};
pub use model::view::{
    BudgetAlert, BudgetFlags, CostBreakdownEntry, CostCategory, DashboardViews,
    FinancialOverviewView, Health, ProjectSummaryView,
};
pub use model::vocabulary::{Badge, HealthStatus, ProjectPhase, ProjectPriority, ProjectSize, Tone};
pub use service::dashboard_service::{DashboardError, DashboardResult, DashboardService};
pub use service::summary_service::assemble_summary;
pub use source::fact_source::{
    CostBreakdownRow, FactResult, FactSource, FactSourceError, ProjectOverviewRow, TaskEffortRow,
};
pub use source::sqlite_fact_source::SqliteFactSource;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
