//! Display-ready view records produced by the summary assembler.
//!
//! # Invariants
//! - `completion_percent` is within `0..=100`.
//! - `breakdown` only contains categories whose amount is `> 0`.
//! - `alert` carries at most one of over-budget or low-buffer, never both.

use crate::model::vocabulary::{Badge, HealthStatus, Tone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Traffic-light classification with its display label and badge tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
    pub label: String,
    pub tone: Tone,
}

impl Health {
    pub fn new(status: HealthStatus) -> Self {
        Self {
            status,
            label: status.label().to_string(),
            tone: status.tone(),
        }
    }
}

/// Project Information and Project Health Summary panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummaryView {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub sponsor_name: Option<String>,
    pub manager_name: Option<String>,
    pub program: Option<String>,
    pub business_unit: Option<String>,

    pub phase: Badge,
    pub priority: Badge,
    pub size: Badge,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_date_display: String,
    pub end_date_display: String,
    pub duration_working_days: Option<i64>,
    pub days_remaining: Option<i64>,

    pub total_milestones: i64,
    pub completed_milestones: i64,
    pub in_progress_milestones: i64,
    pub not_started_milestones: i64,
    pub completion_percent: u8,
    /// `false` drives the "No milestones" hint.
    pub has_milestones: bool,

    pub open_risks: i64,
    pub open_issues: i64,
    pub high_priority_risks: i64,
    pub critical_issues: i64,
    pub team_count: i64,
    pub health: Health,

    pub total_effort_man_days: Option<i64>,
    pub total_effort: String,

    /// Currency-compact budget string.
    pub budget: String,
    pub percent_spent: i64,
    pub is_over_budget: bool,
    pub is_low_buffer: bool,
}

/// Actual-cost category in the financial breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Labor,
    Materials,
    Infrastructure,
    Other,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        CostCategory::Labor,
        CostCategory::Materials,
        CostCategory::Infrastructure,
        CostCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Labor => "Labor",
            Self::Materials => "Materials",
            Self::Infrastructure => "Infrastructure",
            Self::Other => "Other",
        }
    }
}

/// One non-zero slice of actual cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownEntry {
    pub category: CostCategory,
    pub amount: f64,
    pub amount_display: String,
    pub percent_of_total: f64,
    pub percent_of_budget: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetFlags {
    pub is_over_budget: bool,
    pub is_low_buffer: bool,
    pub is_remaining_low: bool,
}

/// The single budget alert a consumer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetAlert {
    OverBudget,
    LowBuffer,
}

/// Financial Overview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverviewView {
    pub budget: f64,
    pub actual_cost: f64,
    pub remaining: f64,
    pub utilization_percent: f64,
    pub budget_display: String,
    pub actual_cost_display: String,
    pub remaining_display: String,
    pub utilization_display: String,
    pub breakdown: Vec<CostBreakdownEntry>,
    pub flags: BudgetFlags,
    pub alert: Option<BudgetAlert>,
}

/// Both views derived from one facts snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    pub summary: ProjectSummaryView,
    pub financial: FinancialOverviewView,
}
