//! Traffic-light health classification.
//!
//! Rules are evaluated in order and the first match wins:
//! 1. open risks > 5, open issues > 10 or critical issues > 3 -> red.
//! 2. open risks > 3, open issues > 5 or high-priority risks > 2 -> yellow.
//! 3. milestones exist, completion < 50% and more than half of the scheduled
//!    span has elapsed -> yellow.
//! 4. otherwise green.
//!
//! # Invariants
//! - Raising any risk/issue counter never lowers severity.

use crate::derive::completion::completion_percent;
use crate::model::view::Health;
use crate::model::vocabulary::HealthStatus;

const CRITICAL_OPEN_RISKS: i64 = 5;
const CRITICAL_OPEN_ISSUES: i64 = 10;
const CRITICAL_CRITICAL_ISSUES: i64 = 3;

const AT_RISK_OPEN_RISKS: i64 = 3;
const AT_RISK_OPEN_ISSUES: i64 = 5;
const AT_RISK_HIGH_PRIORITY_RISKS: i64 = 2;

const LAGGING_COMPLETION_PERCENT: u8 = 50;
const LATE_ELAPSED_FRACTION: f64 = 0.5;

/// Risk, issue and schedule signals feeding the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthSignals {
    pub open_risks: i64,
    pub open_issues: i64,
    pub critical_issues: i64,
    pub high_priority_risks: i64,
    pub total_milestones: i64,
    pub completed_milestones: i64,
    pub days_remaining: Option<i64>,
    /// Share of the scheduled span elapsed at "today"; see `temporal::elapsed_fraction`.
    pub elapsed_fraction: Option<f64>,
}

pub fn classify_health(signals: &HealthSignals) -> Health {
    Health::new(classify_status(signals))
}

pub fn classify_status(signals: &HealthSignals) -> HealthStatus {
    if signals.open_risks > CRITICAL_OPEN_RISKS
        || signals.open_issues > CRITICAL_OPEN_ISSUES
        || signals.critical_issues > CRITICAL_CRITICAL_ISSUES
    {
        return HealthStatus::Red;
    }

    if signals.open_risks > AT_RISK_OPEN_RISKS
        || signals.open_issues > AT_RISK_OPEN_ISSUES
        || signals.high_priority_risks > AT_RISK_HIGH_PRIORITY_RISKS
    {
        return HealthStatus::Yellow;
    }

    if is_lagging_schedule(signals) {
        return HealthStatus::Yellow;
    }

    HealthStatus::Green
}

fn is_lagging_schedule(signals: &HealthSignals) -> bool {
    signals.total_milestones > 0
        && completion_percent(signals.total_milestones, signals.completed_milestones)
            < LAGGING_COMPLETION_PERCENT
        && signals.days_remaining.is_some()
        && signals
            .elapsed_fraction
            .is_some_and(|fraction| fraction > LATE_ELAPSED_FRACTION)
}

#[cfg(test)]
mod tests {
    use super::{classify_health, classify_status, HealthSignals};
    use crate::model::vocabulary::HealthStatus;

    #[test]
    fn red_when_any_critical_threshold_is_crossed() {
        for signals in [
            HealthSignals { open_risks: 6, ..HealthSignals::default() },
            HealthSignals { open_issues: 11, ..HealthSignals::default() },
            HealthSignals { critical_issues: 4, ..HealthSignals::default() },
        ] {
            assert_eq!(classify_status(&signals), HealthStatus::Red);
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let signals = HealthSignals {
            open_risks: 3,
            open_issues: 5,
            critical_issues: 3,
            high_priority_risks: 2,
            ..HealthSignals::default()
        };
        assert_eq!(classify_status(&signals), HealthStatus::Green);
    }

    #[test]
    fn yellow_when_at_risk_threshold_is_crossed() {
        let health = classify_health(&HealthSignals {
            open_risks: 4,
            ..HealthSignals::default()
        });
        assert_eq!(health.status, HealthStatus::Yellow);
        assert_eq!(health.label, "At Risk");
    }

    #[test]
    fn yellow_when_lagging_late_in_schedule() {
        let lagging = HealthSignals {
            total_milestones: 10,
            completed_milestones: 3,
            days_remaining: Some(10),
            elapsed_fraction: Some(0.7),
            ..HealthSignals::default()
        };
        assert_eq!(classify_status(&lagging), HealthStatus::Yellow);

        let early = HealthSignals {
            elapsed_fraction: Some(0.5),
            ..lagging
        };
        assert_eq!(classify_status(&early), HealthStatus::Green);

        let unscheduled = HealthSignals {
            days_remaining: None,
            ..lagging
        };
        assert_eq!(classify_status(&unscheduled), HealthStatus::Green);
    }

    #[test]
    fn green_label_is_on_track() {
        let health = classify_health(&HealthSignals::default());
        assert_eq!(health.status, HealthStatus::Green);
        assert_eq!(health.label, "On Track");
    }
}
