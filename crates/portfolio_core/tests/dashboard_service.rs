use chrono::NaiveDate;
use portfolio_core::db::open_db_in_memory;
use portfolio_core::{
    CostBreakdownRow, DashboardError, DashboardService, FactResult, FactSource, FactSourceError,
    HealthStatus, ProjectOverviewRow, SqliteFactSource, TaskEffortRow,
};
use std::cell::RefCell;

/// In-memory source with per-read failure injection and a call log.
#[derive(Default)]
struct StubSource {
    overview: Option<ProjectOverviewRow>,
    cost: Option<CostBreakdownRow>,
    team: i64,
    high_risks: i64,
    critical_issues: i64,
    hours: Vec<Option<f64>>,
    failing: Vec<&'static str>,
    calls: RefCell<Vec<&'static str>>,
}

impl StubSource {
    fn read<T>(&self, name: &'static str, value: T) -> FactResult<T> {
        self.calls.borrow_mut().push(name);
        if self.failing.contains(&name) {
            return Err(FactSourceError::Unavailable(format!("{name} timed out")));
        }
        Ok(value)
    }
}

impl FactSource for StubSource {
    fn project_overview(&self, _project_id: &str) -> FactResult<Option<ProjectOverviewRow>> {
        self.read("project_overview", self.overview.clone())
    }

    fn team_count(&self, _project_id: &str) -> FactResult<i64> {
        self.read("team_count", self.team)
    }

    fn high_priority_open_risk_count(&self, _project_id: &str) -> FactResult<i64> {
        self.read("high_priority_open_risk_count", self.high_risks)
    }

    fn critical_open_issue_count(&self, _project_id: &str) -> FactResult<i64> {
        self.read("critical_open_issue_count", self.critical_issues)
    }

    fn task_effort_rows(&self, _project_id: &str) -> FactResult<Vec<TaskEffortRow>> {
        let rows = self
            .hours
            .iter()
            .map(|hours| TaskEffortRow {
                estimated_hours: *hours,
            })
            .collect();
        self.read("task_effort_rows", rows)
    }

    fn project_cost_breakdown(&self, _project_id: &str) -> FactResult<Option<CostBreakdownRow>> {
        self.read("project_cost_breakdown", self.cost.clone())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn overview_row() -> ProjectOverviewRow {
    ProjectOverviewRow {
        id: "PRJ-1".to_string(),
        name: Some("CRM Rollout".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
        end_date: NaiveDate::from_ymd_opt(2025, 2, 6),
        budget: Some(100_000.0),
        actual_cost: Some(40_000.0),
        total_milestones: 10,
        completed_milestones: 7,
        open_risks: 1,
        open_issues: 2,
        ..ProjectOverviewRow::default()
    }
}

#[test]
fn load_dashboard_combines_all_reads() {
    let source = StubSource {
        overview: Some(overview_row()),
        cost: Some(CostBreakdownRow {
            budget: Some(100_000.0),
            actual_cost: Some(45_000.0),
            labor_cost: Some(45_000.0),
            ..CostBreakdownRow::default()
        }),
        team: 5,
        high_risks: 3,
        hours: vec![Some(8.0), None, Some(16.0)],
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let views = service.load_dashboard("PRJ-1", today()).unwrap();
    assert_eq!(views.summary.team_count, 5);
    assert_eq!(views.summary.high_priority_risks, 3);
    assert_eq!(views.summary.health.status, HealthStatus::Yellow);
    assert_eq!(views.summary.total_effort, "3 man-days");
    assert_eq!(views.financial.actual_cost, 45_000.0);
    assert_eq!(views.financial.breakdown.len(), 1);
    assert_eq!(views.financial.breakdown[0].percent_of_total, 100.0);
}

#[test]
fn failed_secondary_reads_degrade_without_aborting() {
    let source = StubSource {
        overview: Some(overview_row()),
        team: 9,
        high_risks: 7,
        critical_issues: 8,
        hours: vec![Some(80.0)],
        failing: vec![
            "team_count",
            "high_priority_open_risk_count",
            "critical_open_issue_count",
            "task_effort_rows",
        ],
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let views = service.load_dashboard("PRJ-1", today()).unwrap();
    assert_eq!(views.summary.team_count, 0);
    assert_eq!(views.summary.high_priority_risks, 0);
    assert_eq!(views.summary.critical_issues, 0);
    assert_eq!(views.summary.total_effort, "—");
    assert_eq!(views.summary.health.status, HealthStatus::Green);
    assert_eq!(source.calls.borrow().len(), 6);
}

#[test]
fn overview_failure_is_surfaced_after_all_reads_settle() {
    let source = StubSource {
        overview: Some(overview_row()),
        failing: vec!["project_overview"],
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let err = service.load_dashboard("PRJ-1", today()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Source(FactSourceError::Unavailable(_))
    ));
    assert_eq!(source.calls.borrow().len(), 6);
}

#[test]
fn missing_overview_and_cost_rows_is_not_found() {
    let source = StubSource::default();
    let service = DashboardService::new(&source);

    let err = service.load_dashboard(" PRJ-404 ", today()).unwrap_err();
    match err {
        DashboardError::ProjectNotFound(project_id) => assert_eq!(project_id, "PRJ-404"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_overview_with_cost_row_degrades_to_defaults() {
    let source = StubSource {
        cost: Some(CostBreakdownRow {
            budget: Some(50_000.0),
            actual_cost: Some(10_000.0),
            ..CostBreakdownRow::default()
        }),
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let views = service.load_dashboard("PRJ-2", today()).unwrap();
    assert_eq!(views.summary.project_id.as_deref(), Some("PRJ-2"));
    assert_eq!(views.summary.completion_percent, 0);
    assert_eq!(views.summary.budget, "$0");
    assert_eq!(views.financial.budget, 50_000.0);
    assert_eq!(views.financial.utilization_percent, 20.0);
}

#[test]
fn blank_project_id_is_rejected_before_reading() {
    let source = StubSource::default();
    let service = DashboardService::new(&source);

    let err = service.gather_facts("   ").unwrap_err();
    assert!(matches!(err, DashboardError::InvalidProjectId));
    assert!(source.calls.borrow().is_empty());
}

#[test]
fn sqlite_backed_load_produces_views() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO projects (id, name, state, start_date, end_date, budget, actual_cost, labor_cost)
         VALUES ('PRJ-S', 'Billing Revamp', 'Active', '2025-01-03', '2025-01-06', 1000, 950, 950);
         INSERT INTO milestones (project_id, name, status) VALUES ('PRJ-S', 'M1', 'Completed');
         INSERT INTO issues (project_id, title, priority, status) VALUES ('PRJ-S', 'outage', 'Critical', 'Open');",
    )
    .unwrap();
    let source = SqliteFactSource::try_new(&conn).unwrap();
    let service = DashboardService::new(source);

    let views = service.load_dashboard("PRJ-S", today()).unwrap();
    assert_eq!(views.summary.duration_working_days, Some(2));
    assert_eq!(views.summary.completion_percent, 100);
    assert_eq!(views.summary.critical_issues, 1);
    assert_eq!(views.summary.percent_spent, 95);
    assert!(views.summary.is_low_buffer);
    assert_eq!(views.financial.breakdown.len(), 1);
}

#[test]
fn failed_cost_read_without_overview_is_an_error_not_missing() {
    let source = StubSource {
        failing: vec!["project_cost_breakdown"],
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let err = service.load_dashboard("PRJ-9", today()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Source(FactSourceError::Unavailable(_))
    ));
    assert_eq!(source.calls.borrow().len(), 6);
}

#[test]
fn failed_cost_read_with_overview_degrades() {
    let source = StubSource {
        overview: Some(overview_row()),
        failing: vec!["project_cost_breakdown"],
        ..StubSource::default()
    };
    let service = DashboardService::new(&source);

    let views = service.load_dashboard("PRJ-1", today()).unwrap();
    assert_eq!(views.financial.budget, 100_000.0);
    assert_eq!(views.financial.actual_cost, 40_000.0);
    assert!(views.financial.breakdown.is_empty());
}
