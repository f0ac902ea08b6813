//! Raw project facts consumed by the summary assembler.
//!
//! # Responsibility
//! - Carry one snapshot of overview, ancillary-count, effort and cost rows.
//! - Absorb degenerate input (negatives, non-finite numbers) before derivation.
//!
//! # Invariants
//! - `sanitized()` never fails and is idempotent.
//! - After sanitizing, counters are `>= 0` and amounts are finite and `>= 0`.
//! - `start_date > end_date` is allowed; duration is then reported as 0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-category actual costs plus the budget/actual pair from the projects row.
///
/// When present, these values win over the overview row in the financial panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub labor: Option<f64>,
    pub materials: Option<f64>,
    pub infrastructure: Option<f64>,
    pub other: Option<f64>,
}

/// Input bundle for one project, assembled by the caller from the fact source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFacts {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub sponsor_name: Option<String>,
    pub manager_name: Option<String>,
    pub program: Option<String>,
    pub business_unit: Option<String>,

    /// Phase/state label as stored upstream.
    pub state: Option<String>,
    pub priority: Option<String>,
    pub size: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// Budget from the overview row.
    pub budget: Option<f64>,
    /// Actual cost from the overview row.
    pub actual_cost: Option<f64>,
    pub cost_breakdown: Option<CostBreakdown>,

    pub total_milestones: i64,
    pub completed_milestones: i64,
    pub in_progress_milestones: i64,
    pub not_started_milestones: i64,
    pub open_risks: i64,
    pub open_issues: i64,

    pub team_count: i64,
    pub high_priority_risks: i64,
    pub critical_issues: i64,

    /// Estimated hours per task; `None` entries count as zero.
    pub task_hours: Vec<Option<f64>>,
}

impl ProjectFacts {
    /// Returns a copy with counters clamped and amounts made finite.
    ///
    /// # Invariants
    /// - Negative counters become `0`.
    /// - Non-finite amounts become `None`; negative amounts become `0`.
    /// - Non-finite or negative task hours become `Some(0.0)`.
    pub fn sanitized(&self) -> Self {
        Self {
            budget: sanitize_amount(self.budget),
            actual_cost: sanitize_amount(self.actual_cost),
            cost_breakdown: self.cost_breakdown.as_ref().map(|row| CostBreakdown {
                budget: sanitize_amount(row.budget),
                actual_cost: sanitize_amount(row.actual_cost),
                labor: sanitize_amount(row.labor),
                materials: sanitize_amount(row.materials),
                infrastructure: sanitize_amount(row.infrastructure),
                other: sanitize_amount(row.other),
            }),
            total_milestones: self.total_milestones.max(0),
            completed_milestones: self.completed_milestones.max(0),
            in_progress_milestones: self.in_progress_milestones.max(0),
            not_started_milestones: self.not_started_milestones.max(0),
            open_risks: self.open_risks.max(0),
            open_issues: self.open_issues.max(0),
            team_count: self.team_count.max(0),
            high_priority_risks: self.high_priority_risks.max(0),
            critical_issues: self.critical_issues.max(0),
            task_hours: self
                .task_hours
                .iter()
                .map(|hours| hours.map(|value| sanitize_amount(Some(value)).unwrap_or(0.0)))
                .collect(),
            ..self.clone()
        }
    }

    /// Sum of estimated task hours, treating missing entries as zero.
    pub fn total_effort_hours(&self) -> f64 {
        self.task_hours
            .iter()
            .map(|hours| match hours {
                Some(value) if value.is_finite() && *value > 0.0 => *value,
                _ => 0.0,
            })
            .sum()
    }

    /// Budget shown in the financial panel: projects row first, overview second.
    pub fn financial_budget(&self) -> Option<f64> {
        self.cost_breakdown
            .as_ref()
            .and_then(|row| row.budget)
            .or(self.budget)
    }

    /// Actual cost shown in the financial panel: projects row first, overview second.
    pub fn financial_actual_cost(&self) -> Option<f64> {
        self.cost_breakdown
            .as_ref()
            .and_then(|row| row.actual_cost)
            .or(self.actual_cost)
    }
}

fn sanitize_amount(value: Option<f64>) -> Option<f64> {
    match value {
        Some(amount) if !amount.is_finite() => None,
        Some(amount) if amount < 0.0 => Some(0.0),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{CostBreakdown, ProjectFacts};

    #[test]
    fn sanitized_clamps_counters_and_amounts() {
        let facts = ProjectFacts {
            open_risks: -3,
            total_milestones: -1,
            budget: Some(f64::NAN),
            actual_cost: Some(-50.0),
            task_hours: vec![Some(-4.0), None, Some(f64::INFINITY), Some(8.0)],
            ..ProjectFacts::default()
        };

        let clean = facts.sanitized();
        assert_eq!(clean.open_risks, 0);
        assert_eq!(clean.total_milestones, 0);
        assert_eq!(clean.budget, None);
        assert_eq!(clean.actual_cost, Some(0.0));
        assert_eq!(clean.task_hours, vec![Some(0.0), None, Some(0.0), Some(8.0)]);
        assert_eq!(clean.sanitized(), clean);
    }

    #[test]
    fn total_effort_hours_ignores_missing_entries() {
        let facts = ProjectFacts {
            task_hours: vec![Some(12.5), None, Some(3.5)],
            ..ProjectFacts::default()
        };
        assert_eq!(facts.total_effort_hours(), 16.0);
    }

    #[test]
    fn financial_values_prefer_cost_breakdown_row() {
        let facts = ProjectFacts {
            budget: Some(100.0),
            actual_cost: Some(40.0),
            cost_breakdown: Some(CostBreakdown {
                actual_cost: Some(55.0),
                ..CostBreakdown::default()
            }),
            ..ProjectFacts::default()
        };
        assert_eq!(facts.financial_budget(), Some(100.0));
        assert_eq!(facts.financial_actual_cost(), Some(55.0));
    }
}
