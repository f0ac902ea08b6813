//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard loading to Dart via FRB as one synchronous call.
//! - Convert core views into JSON payloads the dashboard widgets bind to.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through envelope fields, never by throwing.

use chrono::{Local, NaiveDate};
use log::warn;
use portfolio_core::db::open_db;
use portfolio_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DashboardError, DashboardService, DashboardViews, SqliteFactSource,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DASHBOARD_DB_FILE_NAME: &str = "portfolio_dashboard.sqlite3";
const DB_PATH_ENV: &str = "PORTFOLIO_DB_PATH";
static DASHBOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Outcome of a dashboard load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardLoadStatus {
    Ok,
    NotFound,
    Error,
}

/// Response envelope for the project dashboard screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub status: DashboardLoadStatus,
    /// Human-readable message for banners and diagnostics.
    pub message: String,
    /// `ProjectSummaryView` as JSON; set only when `status == Ok`.
    pub summary_json: Option<String>,
    /// `FinancialOverviewView` as JSON; set only when `status == Ok`.
    pub financial_json: Option<String>,
}

impl DashboardResponse {
    fn failure(status: DashboardLoadStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            summary_json: None,
            financial_json: None,
        }
    }
}

/// Loads the dashboard views for one project.
///
/// Input semantics:
/// - `project_id`: trimmed before lookup.
/// - `today`: optional `YYYY-MM-DD`; absent or unparsable falls back to the
///   local date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn load_project_dashboard(project_id: String, today: Option<String>) -> DashboardResponse {
    let today = resolve_today(today.as_deref());
    load_dashboard_from(&resolve_dashboard_db_path(), &project_id, today)
}

fn load_dashboard_from(db_path: &Path, project_id: &str, today: NaiveDate) -> DashboardResponse {
    let conn = match open_db(db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return DashboardResponse::failure(
                DashboardLoadStatus::Error,
                format!("load_project_dashboard failed: {err}"),
            );
        }
    };
    let source = match SqliteFactSource::try_new(&conn) {
        Ok(source) => source,
        Err(err) => {
            return DashboardResponse::failure(
                DashboardLoadStatus::Error,
                format!("load_project_dashboard failed: {err}"),
            );
        }
    };

    match DashboardService::new(source).load_dashboard(project_id, today) {
        Ok(views) => to_success_response(&views),
        Err(DashboardError::ProjectNotFound(id)) => DashboardResponse::failure(
            DashboardLoadStatus::NotFound,
            format!("Project `{id}` was not found."),
        ),
        Err(err) => DashboardResponse::failure(
            DashboardLoadStatus::Error,
            format!("load_project_dashboard failed: {err}"),
        ),
    }
}

fn to_success_response(views: &DashboardViews) -> DashboardResponse {
    let encoded = serde_json::to_string(&views.summary).and_then(|summary| {
        serde_json::to_string(&views.financial).map(|financial| (summary, financial))
    });
    match encoded {
        Ok((summary, financial)) => DashboardResponse {
            status: DashboardLoadStatus::Ok,
            message: "Dashboard loaded.".to_string(),
            summary_json: Some(summary),
            financial_json: Some(financial),
        },
        Err(err) => DashboardResponse::failure(
            DashboardLoadStatus::Error,
            format!("load_project_dashboard failed to encode views: {err}"),
        ),
    }
}

fn resolve_today(raw: Option<&str>) -> NaiveDate {
    let local_today = Local::now().date_naive();
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return local_today;
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|err| {
        warn!("event=ffi_today module=ffi status=degraded input={raw} error={err}");
        local_today
    })
}

fn resolve_dashboard_db_path() -> PathBuf {
    DASHBOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DASHBOARD_DB_FILE_NAME)
        })
        .clone()
}
