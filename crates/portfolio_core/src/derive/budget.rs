//! Budget consumption figures and the per-category cost breakdown.
//!
//! # Invariants
//! - `remaining >= 0`; over-budget projects report `remaining == 0`.
//! - `is_over_budget` holds exactly when `spent > budget`.
//! - Low-buffer (utilization) and remaining-low (absolute buffer) use separate
//!   thresholds and may both be set; `alert()` picks the more severe one.

use crate::derive::formatters::{format_currency_full, round_to_tenths};
use crate::model::facts::CostBreakdown;
use crate::model::view::{BudgetAlert, BudgetFlags, CostBreakdownEntry, CostCategory};

/// `percent_spent` above this (and not above 100) is a low buffer.
pub const LOW_BUFFER_PERCENT: i64 = 85;
/// Remaining budget below this share of the budget is flagged.
pub const REMAINING_LOW_FRACTION: f64 = 0.15;

/// Consumption of one budget by its actual cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// Whole-number share for the summary badge.
    pub percent_spent: i64,
    /// One-decimal share for the financial panel.
    pub utilization_percent: f64,
    pub flags: BudgetFlags,
}

impl BudgetStatus {
    /// Derives status from optional budget and actual cost (both default to 0).
    pub fn compute(budget: Option<f64>, actual_cost: Option<f64>) -> Self {
        let budget = budget.filter(|value| value.is_finite()).unwrap_or(0.0);
        let spent = actual_cost.filter(|value| value.is_finite()).unwrap_or(0.0);
        let remaining = (budget - spent).max(0.0);

        let (percent_spent, utilization_percent) = if budget > 0.0 {
            let share = 100.0 * spent / budget;
            (share.round() as i64, round_to_tenths(share))
        } else {
            (0, 0.0)
        };

        let flags = BudgetFlags {
            is_over_budget: spent > budget,
            is_low_buffer: percent_spent > LOW_BUFFER_PERCENT && percent_spent <= 100,
            is_remaining_low: budget > 0.0 && remaining < REMAINING_LOW_FRACTION * budget,
        };

        Self {
            budget,
            spent,
            remaining,
            percent_spent,
            utilization_percent,
            flags,
        }
    }

    /// The one alert to render; over-budget outranks low-buffer.
    pub fn alert(&self) -> Option<BudgetAlert> {
        if self.flags.is_over_budget {
            Some(BudgetAlert::OverBudget)
        } else if self.flags.is_low_buffer {
            Some(BudgetAlert::LowBuffer)
        } else {
            None
        }
    }
}

/// Emits one entry per category with a positive amount, in fixed category order.
///
/// `percent_of_total` is relative to `actual_cost`; when that is zero the
/// category sum stands in so shares still add up to 100.
pub fn cost_breakdown(
    costs: &CostBreakdown,
    actual_cost: f64,
    budget: f64,
) -> Vec<CostBreakdownEntry> {
    let slices = CostCategory::ALL
        .into_iter()
        .filter_map(|category| {
            category_amount(costs, category)
                .filter(|amount| amount.is_finite() && *amount > 0.0)
                .map(|amount| (category, amount))
        })
        .collect::<Vec<_>>();

    let total = if actual_cost > 0.0 {
        actual_cost
    } else {
        slices.iter().map(|(_, amount)| amount).sum()
    };

    slices
        .into_iter()
        .map(|(category, amount)| CostBreakdownEntry {
            category,
            amount,
            amount_display: format_currency_full(Some(amount)),
            percent_of_total: share_of(amount, total),
            percent_of_budget: share_of(amount, budget),
        })
        .collect()
}

fn category_amount(costs: &CostBreakdown, category: CostCategory) -> Option<f64> {
    match category {
        CostCategory::Labor => costs.labor,
        CostCategory::Materials => costs.materials,
        CostCategory::Infrastructure => costs.infrastructure,
        CostCategory::Other => costs.other,
    }
}

fn share_of(amount: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round_to_tenths(amount / whole * 100.0)
    } else {
        0.0
    }
}
