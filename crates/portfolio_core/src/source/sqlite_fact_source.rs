//! SQLite implementation of the fact-source contract.
//!
//! # Responsibility
//! - Read the overview and cost-breakdown views plus ancillary counts.
//! - Decode stored date text into calendar dates.
//!
//! # Invariants
//! - Construction fails when a relation of the contract is missing.
//! - Undecodable dates degrade to `None` with a `warn` event instead of failing.

use crate::db::DbError;
use crate::source::fact_source::{
    CostBreakdownRow, FactResult, FactSource, ProjectOverviewRow, TaskEffortRow,
};
use chrono::NaiveDate;
use log::warn;
use rusqlite::{Connection, OptionalExtension, Row};

const CONTRACT_RELATIONS: &[&str] = &[
    "project_overview",
    "project_cost_breakdown",
    "team_members",
    "risks",
    "issues",
    "tasks",
];

const OVERVIEW_SELECT_SQL: &str = "SELECT
    id,
    name,
    sponsor_name,
    manager_name,
    program,
    business_unit,
    state,
    priority,
    size,
    start_date,
    end_date,
    budget,
    actual_cost,
    total_milestones,
    completed_milestones,
    in_progress_milestones,
    not_started_milestones,
    open_risks,
    open_issues
FROM project_overview
WHERE id = ?1;";

const COST_BREAKDOWN_SELECT_SQL: &str = "SELECT
    budget,
    actual_cost,
    labor_cost,
    materials_cost,
    infrastructure_cost,
    other_cost
FROM project_cost_breakdown
WHERE project_id = ?1;";

const HIGH_PRIORITY_OPEN_SQL: &str = "SELECT COUNT(*) FROM {table}
WHERE project_id = ?1
  AND LOWER(TRIM(COALESCE(priority, ''))) IN ('high', 'critical')
  AND LOWER(TRIM(COALESCE(status, ''))) <> 'closed';";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed fact source over a migrated connection.
pub struct SqliteFactSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFactSource<'conn> {
    /// Wraps a connection after checking the contract relations exist.
    ///
    /// # Errors
    /// - `DbError::MissingRelation` when a required table or view is absent.
    pub fn try_new(conn: &'conn Connection) -> FactResult<Self> {
        for relation in CONTRACT_RELATIONS {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master
                    WHERE type IN ('table', 'view') AND name = ?1
                );",
                [relation],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(DbError::MissingRelation(*relation).into());
            }
        }
        Ok(Self { conn })
    }

    fn count_high_priority_open(&self, table: &str, project_id: &str) -> FactResult<i64> {
        let sql = HIGH_PRIORITY_OPEN_SQL.replace("{table}", table);
        let count = self
            .conn
            .query_row(&sql, [project_id], |row| row.get::<_, i64>(0))?;
        Ok(count)
    }
}

impl FactSource for SqliteFactSource<'_> {
    fn project_overview(&self, project_id: &str) -> FactResult<Option<ProjectOverviewRow>> {
        let row = self
            .conn
            .query_row(OVERVIEW_SELECT_SQL, [project_id], parse_overview_row)
            .optional()?;
        Ok(row)
    }

    fn team_count(&self, project_id: &str) -> FactResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM team_members WHERE project_id = ?1;",
            [project_id],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count)
    }

    fn high_priority_open_risk_count(&self, project_id: &str) -> FactResult<i64> {
        self.count_high_priority_open("risks", project_id)
    }

    fn critical_open_issue_count(&self, project_id: &str) -> FactResult<i64> {
        self.count_high_priority_open("issues", project_id)
    }

    fn task_effort_rows(&self, project_id: &str) -> FactResult<Vec<TaskEffortRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT estimated_hours FROM tasks WHERE project_id = ?1 ORDER BY id ASC;",
        )?;
        let rows = stmt
            .query_map([project_id], |row| {
                Ok(TaskEffortRow {
                    estimated_hours: row.get("estimated_hours")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn project_cost_breakdown(&self, project_id: &str) -> FactResult<Option<CostBreakdownRow>> {
        let row = self
            .conn
            .query_row(COST_BREAKDOWN_SELECT_SQL, [project_id], |row| {
                Ok(CostBreakdownRow {
                    budget: row.get("budget")?,
                    actual_cost: row.get("actual_cost")?,
                    labor_cost: row.get("labor_cost")?,
                    materials_cost: row.get("materials_cost")?,
                    infrastructure_cost: row.get("infrastructure_cost")?,
                    other_cost: row.get("other_cost")?,
                })
            })
            .optional()?;
        Ok(row)
    }
}

fn parse_overview_row(row: &Row<'_>) -> rusqlite::Result<ProjectOverviewRow> {
    let id: String = row.get("id")?;
    let start_date = parse_date_column(row, "start_date", &id)?;
    let end_date = parse_date_column(row, "end_date", &id)?;

    Ok(ProjectOverviewRow {
        name: row.get("name")?,
        sponsor_name: row.get("sponsor_name")?,
        manager_name: row.get("manager_name")?,
        program: row.get("program")?,
        business_unit: row.get("business_unit")?,
        state: row.get("state")?,
        priority: row.get("priority")?,
        size: row.get("size")?,
        start_date,
        end_date,
        budget: row.get("budget")?,
        actual_cost: row.get("actual_cost")?,
        total_milestones: count_column(row, "total_milestones")?,
        completed_milestones: count_column(row, "completed_milestones")?,
        in_progress_milestones: count_column(row, "in_progress_milestones")?,
        not_started_milestones: count_column(row, "not_started_milestones")?,
        open_risks: count_column(row, "open_risks")?,
        open_issues: count_column(row, "open_issues")?,
        id,
    })
}

fn count_column(row: &Row<'_>, column: &str) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(column)?.unwrap_or(0))
}

fn parse_date_column(
    row: &Row<'_>,
    column: &str,
    project_id: &str,
) -> rusqlite::Result<Option<NaiveDate>> {
    let Some(raw) = row.get::<_, Option<String>>(column)? else {
        return Ok(None);
    };
    let parsed = parse_date_text(&raw);
    if parsed.is_none() {
        warn!(
            "event=fact_decode module=source status=degraded project_id={project_id} column={column}"
        );
    }
    Ok(parsed)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
pub(crate) fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        })
}
