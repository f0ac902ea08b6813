//! Command-line dashboard for one project.
//!
//! # Responsibility
//! - Load a project's dashboard views from a SQLite fact-source file.
//! - Print them as a plain-text panel layout or as JSON.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use portfolio_core::db::open_db;
use portfolio_core::derive::formatters::EMPTY_PLACEHOLDER;
use portfolio_core::{
    default_log_level, init_logging, BudgetAlert, DashboardService, DashboardViews, ProjectSize,
    SqliteFactSource,
};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(about = "Project health and financial dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Project id to render
    project: String,

    /// SQLite database holding the project tables
    #[arg(long, env = "PORTFOLIO_DB_PATH")]
    db: PathBuf,

    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let source = SqliteFactSource::try_new(&conn).context("database is missing dashboard views")?;
    let views = DashboardService::new(source)
        .load_dashboard(&cli.project, today)
        .with_context(|| format!("failed to load dashboard for `{}`", cli.project))?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
        OutputFormat::Text => print!("{}", render_text(&views)),
    }
    Ok(())
}

fn render_text(views: &DashboardViews) -> String {
    let summary = &views.summary;
    let financial = &views.financial;
    let text = |value: &Option<String>| {
        value
            .clone()
            .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
    };
    let days = |value: Option<i64>| {
        value.map_or_else(|| EMPTY_PLACEHOLDER.to_string(), |days| days.to_string())
    };
    let size = match summary.size.label.as_deref().and_then(ProjectSize::parse) {
        Some(parsed) => format!("{} [{}]", text(&summary.size.label), parsed.code()),
        None => text(&summary.size.label),
    };

    let mut lines = vec![
        format!("# {}", text(&summary.name)),
        String::new(),
        "## Project Information".to_string(),
        format!("  Sponsor:        {}", text(&summary.sponsor_name)),
        format!("  Manager:        {}", text(&summary.manager_name)),
        format!("  Program:        {}", text(&summary.program)),
        format!("  Business unit:  {}", text(&summary.business_unit)),
        format!("  Phase:          {}", text(&summary.phase.label)),
        format!("  Priority:       {}", text(&summary.priority.label)),
        format!("  Size:           {size}"),
        format!(
            "  Schedule:       {} → {} ({} working days)",
            summary.start_date_display,
            summary.end_date_display,
            days(summary.duration_working_days)
        ),
        format!("  Days remaining: {}", days(summary.days_remaining)),
        format!("  Team members:   {}", summary.team_count),
        format!("  Total effort:   {}", summary.total_effort),
        format!("  Budget:         {} ({}% spent)", summary.budget, summary.percent_spent),
        String::new(),
        "## Project Health Summary".to_string(),
        format!(
            "  Health:         {} ({:?})",
            summary.health.label, summary.health.tone
        ),
    ];

    if summary.has_milestones {
        lines.push(format!(
            "  Completion:     {}% ({}/{} milestones, {} in progress)",
            summary.completion_percent,
            summary.completed_milestones,
            summary.total_milestones,
            summary.in_progress_milestones
        ));
    } else {
        lines.push("  Completion:     No milestones".to_string());
    }
    lines.push(format!(
        "  Open risks:     {} ({} high priority)",
        summary.open_risks, summary.high_priority_risks
    ));
    lines.push(format!(
        "  Open issues:    {} ({} critical)",
        summary.open_issues, summary.critical_issues
    ));

    lines.push(String::new());
    lines.push("## Financial Overview".to_string());
    lines.push(format!("  Budget:         {}", financial.budget_display));
    lines.push(format!("  Actual cost:    {}", financial.actual_cost_display));
    lines.push(format!("  Remaining:      {}", financial.remaining_display));
    lines.push(format!("  Utilization:    {}", financial.utilization_display));
    match financial.alert {
        Some(BudgetAlert::OverBudget) => lines.push("  Alert:          Over budget".to_string()),
        Some(BudgetAlert::LowBuffer) => lines.push("  Alert:          Low budget buffer".to_string()),
        None => {}
    }
    for entry in &financial.breakdown {
        lines.push(format!(
            "  - {:<15} {:>12}  {:>5.1}% of cost  {:>5.1}% of budget",
            entry.category.label(),
            entry.amount_display,
            entry.percent_of_total,
            entry.percent_of_budget
        ));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
