//! Summary assembler: the single entry point used by the rendering layer.
//!
//! # Responsibility
//! - Compose formatters, temporal, completion, budget and health derivations
//!   over one `ProjectFacts` snapshot.
//!
//! # Invariants
//! - Total and pure: never fails, never logs, never reads the clock.
//! - Identity and classification labels pass through unchanged.
//! - The financial panel prefers the cost-breakdown row over the overview row.

use crate::derive::budget::{cost_breakdown, BudgetStatus};
use crate::derive::completion::{completion_percent, has_milestones};
use crate::derive::formatters::{
    format_currency_compact, format_currency_full, format_date, format_effort, format_percent,
    man_days,
};
use crate::derive::health::{classify_health, HealthSignals};
use crate::derive::temporal::{days_remaining, elapsed_fraction, working_days};
use crate::model::facts::ProjectFacts;
use crate::model::view::{DashboardViews, FinancialOverviewView, ProjectSummaryView};
use crate::model::vocabulary::Badge;
use chrono::NaiveDate;

/// Derives both dashboard views from one facts snapshot.
pub fn assemble_summary(facts: &ProjectFacts, today: NaiveDate) -> DashboardViews {
    let facts = facts.sanitized();
    DashboardViews {
        summary: build_summary(&facts, today),
        financial: build_financial(&facts),
    }
}

fn build_summary(facts: &ProjectFacts, today: NaiveDate) -> ProjectSummaryView {
    let remaining_days = days_remaining(facts.end_date, today);
    let health = classify_health(&HealthSignals {
        open_risks: facts.open_risks,
        open_issues: facts.open_issues,
        critical_issues: facts.critical_issues,
        high_priority_risks: facts.high_priority_risks,
        total_milestones: facts.total_milestones,
        completed_milestones: facts.completed_milestones,
        days_remaining: remaining_days,
        elapsed_fraction: elapsed_fraction(facts.start_date, facts.end_date, today),
    });
    let budget = BudgetStatus::compute(facts.budget, facts.actual_cost);
    let effort_hours = Some(facts.total_effort_hours());

    ProjectSummaryView {
        project_id: facts.project_id.clone(),
        name: facts.name.clone(),
        sponsor_name: facts.sponsor_name.clone(),
        manager_name: facts.manager_name.clone(),
        program: facts.program.clone(),
        business_unit: facts.business_unit.clone(),
        phase: Badge::phase(facts.state.as_deref()),
        priority: Badge::priority(facts.priority.as_deref()),
        size: Badge::size(facts.size.as_deref()),
        start_date: facts.start_date,
        end_date: facts.end_date,
        start_date_display: format_date(facts.start_date),
        end_date_display: format_date(facts.end_date),
        duration_working_days: working_days(facts.start_date, facts.end_date),
        days_remaining: remaining_days,
        total_milestones: facts.total_milestones,
        completed_milestones: facts.completed_milestones,
        in_progress_milestones: facts.in_progress_milestones,
        not_started_milestones: facts.not_started_milestones,
        completion_percent: completion_percent(
            facts.total_milestones,
            facts.completed_milestones,
        ),
        has_milestones: has_milestones(facts.total_milestones),
        open_risks: facts.open_risks,
        open_issues: facts.open_issues,
        high_priority_risks: facts.high_priority_risks,
        critical_issues: facts.critical_issues,
        team_count: facts.team_count,
        health,
        total_effort_man_days: man_days(effort_hours),
        total_effort: format_effort(effort_hours),
        budget: format_currency_compact(facts.budget),
        percent_spent: budget.percent_spent,
        is_over_budget: budget.flags.is_over_budget,
        is_low_buffer: budget.flags.is_low_buffer,
    }
}

fn build_financial(facts: &ProjectFacts) -> FinancialOverviewView {
    let status = BudgetStatus::compute(facts.financial_budget(), facts.financial_actual_cost());
    let breakdown = facts
        .cost_breakdown
        .as_ref()
        .map(|costs| cost_breakdown(costs, status.spent, status.budget))
        .unwrap_or_default();

    FinancialOverviewView {
        budget: status.budget,
        actual_cost: status.spent,
        remaining: status.remaining,
        utilization_percent: status.utilization_percent,
        budget_display: format_currency_full(Some(status.budget)),
        actual_cost_display: format_currency_full(Some(status.spent)),
        remaining_display: format_currency_full(Some(status.remaining)),
        utilization_display: format_percent(Some(status.utilization_percent)),
        breakdown,
        flags: status.flags,
        alert: status.alert(),
    }
}
