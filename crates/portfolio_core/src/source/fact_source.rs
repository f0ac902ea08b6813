//! Fact source contract: the raw rows the dashboard reads per project.
//!
//! # Responsibility
//! - Define the six reads the dashboard performs for one project.
//! - Define the row shapes returned by those reads.
//!
//! # Invariants
//! - Implementations are read-only; no read mutates backend state.
//! - Missing rows are `Ok(None)`, not errors.

use crate::db::DbError;
use crate::model::facts::CostBreakdown;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FactResult<T> = Result<T, FactSourceError>;

/// Failure of a single fact-source read.
#[derive(Debug)]
pub enum FactSourceError {
    Db(DbError),
    /// The backend could not be reached or refused the request.
    Unavailable(String),
    /// A row was returned but could not be decoded.
    InvalidData(String),
}

impl Display for FactSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "fact source unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid fact row: {message}"),
        }
    }
}

impl Error for FactSourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for FactSourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for FactSourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One row of the `project_overview` view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverviewRow {
    pub id: String,
    pub name: Option<String>,
    pub sponsor_name: Option<String>,
    pub manager_name: Option<String>,
    pub program: Option<String>,
    pub business_unit: Option<String>,
    pub state: Option<String>,
    pub priority: Option<String>,
    pub size: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub total_milestones: i64,
    pub completed_milestones: i64,
    pub in_progress_milestones: i64,
    pub not_started_milestones: i64,
    pub open_risks: i64,
    pub open_issues: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskEffortRow {
    pub estimated_hours: Option<f64>,
}

/// One row of the `project_cost_breakdown` view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownRow {
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub labor_cost: Option<f64>,
    pub materials_cost: Option<f64>,
    pub infrastructure_cost: Option<f64>,
    pub other_cost: Option<f64>,
}

impl From<CostBreakdownRow> for CostBreakdown {
    fn from(row: CostBreakdownRow) -> Self {
        Self {
            budget: row.budget,
            actual_cost: row.actual_cost,
            labor: row.labor_cost,
            materials: row.materials_cost,
            infrastructure: row.infrastructure_cost,
            other: row.other_cost,
        }
    }
}

/// Read-side contract of the dashboard backend.
///
/// Risk and issue counters use the predicate
/// `priority in (High, Critical) and status != Closed`, case-insensitively.
pub trait FactSource {
    fn project_overview(&self, project_id: &str) -> FactResult<Option<ProjectOverviewRow>>;
    fn team_count(&self, project_id: &str) -> FactResult<i64>;
    fn high_priority_open_risk_count(&self, project_id: &str) -> FactResult<i64>;
    fn critical_open_issue_count(&self, project_id: &str) -> FactResult<i64>;
    fn task_effort_rows(&self, project_id: &str) -> FactResult<Vec<TaskEffortRow>>;
    fn project_cost_breakdown(&self, project_id: &str) -> FactResult<Option<CostBreakdownRow>>;
}

impl<S: FactSource + ?Sized> FactSource for &S {
    fn project_overview(&self, project_id: &str) -> FactResult<Option<ProjectOverviewRow>> {
        (**self).project_overview(project_id)
    }

    fn team_count(&self, project_id: &str) -> FactResult<i64> {
        (**self).team_count(project_id)
    }

    fn high_priority_open_risk_count(&self, project_id: &str) -> FactResult<i64> {
        (**self).high_priority_open_risk_count(project_id)
    }

    fn critical_open_issue_count(&self, project_id: &str) -> FactResult<i64> {
        (**self).critical_open_issue_count(project_id)
    }

    fn task_effort_rows(&self, project_id: &str) -> FactResult<Vec<TaskEffortRow>> {
        (**self).task_effort_rows(project_id)
    }

    fn project_cost_breakdown(&self, project_id: &str) -> FactResult<Option<CostBreakdownRow>> {
        (**self).project_cost_breakdown(project_id)
    }
}
