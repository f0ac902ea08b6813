//! Milestone-ratio completion.

/// Completed share of milestones as a whole percentage in `0..=100`.
///
/// Zero milestones yields `0`; `completed > total` clamps to `100`.
pub fn completion_percent(total_milestones: i64, completed_milestones: i64) -> u8 {
    if total_milestones <= 0 {
        return 0;
    }
    let ratio = 100.0 * completed_milestones.max(0) as f64 / total_milestones as f64;
    ratio.round().clamp(0.0, 100.0) as u8
}

pub fn has_milestones(total_milestones: i64) -> bool {
    total_milestones > 0
}

#[cfg(test)]
mod tests {
    use super::{completion_percent, has_milestones};

    #[test]
    fn completion_percent_rounds_half_away_from_zero() {
        assert_eq!(completion_percent(10, 7), 70);
        assert_eq!(completion_percent(8, 1), 13);
        assert_eq!(completion_percent(3, 1), 33);
        assert_eq!(completion_percent(3, 2), 67);
    }

    #[test]
    fn completion_percent_handles_degenerate_counts() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(0, 5), 0);
        assert_eq!(completion_percent(4, 9), 100);
        assert_eq!(completion_percent(4, -2), 0);
        assert!(!has_milestones(0));
        assert!(has_milestones(1));
    }
}
