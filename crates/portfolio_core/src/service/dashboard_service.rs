//! Dashboard load use-case.
//!
//! # Responsibility
//! - Issue the six fact-source reads for one project and settle all of them.
//! - Degrade failed secondary reads to defaults instead of aborting the load.
//! - Hand the resulting `ProjectFacts` to the summary assembler.
//!
//! # Invariants
//! - Every read is attempted, even after an earlier read failed.
//! - Only an overview read failure aborts the load, or a cost read failure
//!   when the overview row is absent.
//! - A project with neither an overview row nor a cost row is "not found".

use crate::model::facts::ProjectFacts;
use crate::model::view::DashboardViews;
use crate::service::summary_service::assemble_summary;
use crate::source::fact_source::{
    CostBreakdownRow, FactResult, FactSource, FactSourceError, ProjectOverviewRow, TaskEffortRow,
};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors surfaced to the caller before the assembler runs.
#[derive(Debug)]
pub enum DashboardError {
    /// Project id is blank after trimming.
    InvalidProjectId,
    ProjectNotFound(String),
    /// A read that decides existence failed.
    Source(FactSourceError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProjectId => write!(f, "project id cannot be empty"),
            Self::ProjectNotFound(project_id) => write!(f, "project not found: {project_id}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::InvalidProjectId | Self::ProjectNotFound(_) => None,
        }
    }
}

impl From<FactSourceError> for DashboardError {
    fn from(value: FactSourceError) -> Self {
        Self::Source(value)
    }
}

/// Outcome of every read for one project, before any failure is acted on.
struct SettledReads {
    overview: FactResult<Option<ProjectOverviewRow>>,
    team_count: FactResult<i64>,
    high_priority_risks: FactResult<i64>,
    critical_issues: FactResult<i64>,
    task_effort: FactResult<Vec<TaskEffortRow>>,
    cost_breakdown: FactResult<Option<CostBreakdownRow>>,
}

/// Use-case service wrapping a fact source.
pub struct DashboardService<S: FactSource> {
    source: S,
}

impl<S: FactSource> DashboardService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reads and settles all facts for `project_id`.
    ///
    /// # Errors
    /// - `InvalidProjectId` for blank ids.
    /// - `Source` when the overview read fails, or when the overview row is
    ///   absent and the cost read fails.
    /// - `ProjectNotFound` when neither the overview nor the cost row exists.
    pub fn gather_facts(&self, project_id: &str) -> DashboardResult<ProjectFacts> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(DashboardError::InvalidProjectId);
        }

        let reads = self.settle_reads(project_id);
        let overview = reads.overview.map_err(|err| {
            error!(
                "event=fact_read module=service status=error read=project_overview project_id={project_id} error={err}"
            );
            DashboardError::Source(err)
        })?;
        // The cost row decides existence when the overview row is absent.
        let cost_breakdown = match (overview.is_some(), reads.cost_breakdown) {
            (false, Err(err)) => {
                error!(
                    "event=fact_read module=service status=error read=project_cost_breakdown project_id={project_id} error={err}"
                );
                return Err(DashboardError::Source(err));
            }
            (_, result) => degrade("project_cost_breakdown", project_id, result),
        };

        if overview.is_none() && cost_breakdown.is_none() {
            info!("event=dashboard_load module=service status=not_found project_id={project_id}");
            return Err(DashboardError::ProjectNotFound(project_id.to_string()));
        }

        let mut facts = facts_from_overview(project_id, overview);
        facts.cost_breakdown = cost_breakdown.map(Into::into);
        facts.team_count = degrade("team_count", project_id, reads.team_count);
        facts.high_priority_risks = degrade(
            "high_priority_open_risk_count",
            project_id,
            reads.high_priority_risks,
        );
        facts.critical_issues = degrade(
            "critical_open_issue_count",
            project_id,
            reads.critical_issues,
        );
        facts.task_hours = degrade("task_effort_rows", project_id, reads.task_effort)
            .into_iter()
            .map(|row| row.estimated_hours)
            .collect();

        Ok(facts)
    }

    /// Gathers facts and assembles both dashboard views.
    pub fn load_dashboard(
        &self,
        project_id: &str,
        today: NaiveDate,
    ) -> DashboardResult<DashboardViews> {
        let started_at = Instant::now();
        let facts = self.gather_facts(project_id)?;
        let views = assemble_summary(&facts, today);
        info!(
            "event=dashboard_load module=service status=ok project_id={} health={:?} duration_ms={}",
            project_id.trim(),
            views.summary.health.status,
            started_at.elapsed().as_millis()
        );
        Ok(views)
    }

    fn settle_reads(&self, project_id: &str) -> SettledReads {
        SettledReads {
            overview: self.source.project_overview(project_id),
            team_count: self.source.team_count(project_id),
            high_priority_risks: self.source.high_priority_open_risk_count(project_id),
            critical_issues: self.source.critical_open_issue_count(project_id),
            task_effort: self.source.task_effort_rows(project_id),
            cost_breakdown: self.source.project_cost_breakdown(project_id),
        }
    }
}

fn degrade<T: Default>(read: &'static str, project_id: &str, result: FactResult<T>) -> T {
    result.unwrap_or_else(|err| {
        warn!(
            "event=fact_read module=service status=degraded read={read} project_id={project_id} error={err}"
        );
        T::default()
    })
}

fn facts_from_overview(project_id: &str, overview: Option<ProjectOverviewRow>) -> ProjectFacts {
    let Some(row) = overview else {
        return ProjectFacts {
            project_id: Some(project_id.to_string()),
            ..ProjectFacts::default()
        };
    };

    ProjectFacts {
        project_id: Some(row.id),
        name: row.name,
        sponsor_name: row.sponsor_name,
        manager_name: row.manager_name,
        program: row.program,
        business_unit: row.business_unit,
        state: row.state,
        priority: row.priority,
        size: row.size,
        start_date: row.start_date,
        end_date: row.end_date,
        budget: row.budget,
        actual_cost: row.actual_cost,
        total_milestones: row.total_milestones,
        completed_milestones: row.completed_milestones,
        in_progress_milestones: row.in_progress_milestones,
        not_started_milestones: row.not_started_milestones,
        open_risks: row.open_risks,
        open_issues: row.open_issues,
        ..ProjectFacts::default()
    }
}
