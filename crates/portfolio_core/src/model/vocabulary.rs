//! Controlled vocabularies for project classification.
//!
//! # Responsibility
//! - Map free-form upstream labels onto typed phase/priority/size/health values.
//! - Assign a badge tone to each value so unknown labels render neutrally.
//!
//! # Invariants
//! - Matching trims, lowercases and collapses `_`/`-`/whitespace runs to one space.
//! - Parsing never fails; unrecognized input yields `None` and a neutral tone.
//! - Display text is never rewritten; only the match key is normalized.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_\-]+").expect("valid separator regex"));

/// Returns the vocabulary match key for a raw label.
pub fn normalize_label(value: &str) -> String {
    SEPARATOR_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}

/// Visual tone used by badges in the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
    Muted,
    Neutral,
}

/// Lifecycle phase (`state` column upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPhase {
    Active,
    Executing,
    InProgress,
    Planning,
    Initiation,
    OnHold,
    Paused,
    Completed,
    Closed,
    Cancelled,
}

impl ProjectPhase {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "active" => Some(Self::Active),
            "executing" => Some(Self::Executing),
            "in progress" => Some(Self::InProgress),
            "planning" => Some(Self::Planning),
            "initiation" => Some(Self::Initiation),
            "on hold" => Some(Self::OnHold),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            "closed" => Some(Self::Closed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Active | Self::Executing | Self::InProgress => Tone::Success,
            Self::Planning | Self::Initiation => Tone::Info,
            Self::OnHold | Self::Paused => Tone::Warning,
            Self::Completed | Self::Closed => Tone::Muted,
            Self::Cancelled => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl ProjectPriority {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Critical => Tone::Danger,
            Self::High => Tone::Warning,
            Self::Medium => Tone::Info,
            Self::Low => Tone::Muted,
        }
    }
}

/// T-shirt size; both long names and single-letter codes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSize {
    ExtraLarge,
    Large,
    Medium,
    Small,
}

impl ProjectSize {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "extra large" | "xl" => Some(Self::ExtraLarge),
            "large" | "l" => Some(Self::Large),
            "medium" | "m" => Some(Self::Medium),
            "small" | "s" => Some(Self::Small),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::ExtraLarge => "XL",
            Self::Large => "L",
            Self::Medium => "M",
            Self::Small => "S",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::ExtraLarge => Tone::Danger,
            Self::Large => Tone::Warning,
            Self::Medium => Tone::Info,
            Self::Small => Tone::Success,
        }
    }
}

/// Traffic-light health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl HealthStatus {
    /// Display label paired with each status.
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "On Track",
            Self::Yellow => "At Risk",
            Self::Red => "Critical",
        }
    }

    /// Ordinal severity; larger is worse.
    pub fn severity(self) -> u8 {
        match self {
            Self::Green => 0,
            Self::Yellow => 1,
            Self::Red => 2,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Green => Tone::Success,
            Self::Yellow => Tone::Warning,
            Self::Red => Tone::Danger,
        }
    }
}

/// Display label paired with its badge tone.
///
/// `label` keeps upstream casing; `tone` is `Neutral` for unknown values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: Option<String>,
    pub tone: Tone,
}

impl Badge {
    pub fn phase(label: Option<&str>) -> Self {
        Self::classify(label, |value| ProjectPhase::parse(value).map(ProjectPhase::tone))
    }

    pub fn priority(label: Option<&str>) -> Self {
        Self::classify(label, |value| {
            ProjectPriority::parse(value).map(ProjectPriority::tone)
        })
    }

    pub fn size(label: Option<&str>) -> Self {
        Self::classify(label, |value| ProjectSize::parse(value).map(ProjectSize::tone))
    }

    fn classify(label: Option<&str>, tone_of: impl Fn(&str) -> Option<Tone>) -> Self {
        let label = label.filter(|value| !value.trim().is_empty());
        Self {
            label: label.map(str::to_string),
            tone: label.and_then(tone_of).unwrap_or(Tone::Neutral),
        }
    }
}
