//! Plan request and plan table types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Longest plan accepted, in days.
pub const MAX_TOTAL_DAYS: u32 = 366;

/// Player skill tier. Accepts the English name or the Chinese label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Label used inside prompts.
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "初学者",
            Level::Intermediate => "中级",
            Level::Advanced => "进阶",
        }
    }

    /// ASCII name used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "初学者" => return Ok(Level::Beginner),
            "中级" => return Ok(Level::Intermediate),
            "进阶" | "高级" => return Ok(Level::Advanced),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(PlanError::InvalidRequest(format!(
                "unknown level '{other}' (expected beginner/intermediate/advanced or 初学者/中级/进阶)"
            ))),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parameters of one plan generation. Validated on construction, read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    level: Level,
    goal: String,
    total_days: u32,
    session_minutes: u32,
    sessions_per_week: Option<u32>,
    equipment: String,
}

impl PlanRequest {
    pub fn new(
        level: Level,
        goal: impl Into<String>,
        total_days: u32,
        session_minutes: u32,
        sessions_per_week: Option<u32>,
        equipment: impl Into<String>,
    ) -> Result<Self, PlanError> {
        require_positive("total days", total_days)?;
        if total_days > MAX_TOTAL_DAYS {
            return Err(PlanError::InvalidRequest(format!(
                "total days must be at most {MAX_TOTAL_DAYS}"
            )));
        }
        require_positive("session minutes", session_minutes)?;
        if let Some(freq) = sessions_per_week {
            require_positive("sessions per week", freq)?;
        }
        Ok(Self {
            level,
            goal: goal.into().trim().to_string(),
            total_days,
            session_minutes,
            sessions_per_week,
            equipment: equipment.into().trim().to_string(),
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn session_minutes(&self) -> u32 {
        self.session_minutes
    }

    pub fn sessions_per_week(&self) -> Option<u32> {
        self.sessions_per_week
    }

    pub fn equipment(&self) -> &str {
        &self.equipment
    }
}

fn require_positive(name: &str, value: u32) -> Result<(), PlanError> {
    if value == 0 {
        return Err(PlanError::InvalidRequest(format!(
            "{name} must be a positive integer"
        )));
    }
    Ok(())
}

/// How the `Day` column is numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayNumbering {
    /// `01`, `02`, ... `NN`
    ZeroPadded,
    /// `D1`, `D2`, ... `DN`
    Prefixed,
}

impl DayNumbering {
    pub fn label(self, day: u32) -> String {
        match self {
            DayNumbering::ZeroPadded => format!("{day:02}"),
            DayNumbering::Prefixed => format!("D{day}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityLevel {
    Low,
    Medium,
    High,
}

impl IntensityLevel {
    /// Recognises `low/medium/high` in any case and the Chinese `低/中/高`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "低" => return Some(Self::Low),
            "中" => return Some(Self::Medium),
            "高" => return Some(Self::High),
            _ => {}
        }
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// One training day. Field names are the CSV column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Theme")]
    pub theme: String,
    /// `;`-separated drill items.
    #[serde(rename = "Drills")]
    pub drills: String,
    #[serde(rename = "DurationMin")]
    pub duration_min: u32,
    /// Kept exactly as written; see [`IntensityLevel::parse`] for accepted labels.
    #[serde(rename = "Intensity")]
    pub intensity: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl PlanRow {
    pub fn intensity_level(&self) -> Option<IntensityLevel> {
        IntensityLevel::parse(&self.intensity)
    }

    pub fn drill_items(&self) -> impl Iterator<Item = &str> {
        self.drills
            .split(|c: char| c == ';' || c == '；')
            .map(str::trim)
            .filter(|item| !item.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanTable {
    pub rows: Vec<PlanRow>,
}

/// A day-column problem found by [`PlanTable::day_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayIssue {
    Missing(String),
    Duplicate(String),
    Unexpected(String),
    OutOfOrder,
}

impl fmt::Display for DayIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayIssue::Missing(day) => write!(f, "day {day} is missing"),
            DayIssue::Duplicate(day) => write!(f, "day {day} appears more than once"),
            DayIssue::Unexpected(day) => write!(f, "day {day} is outside the requested range"),
            DayIssue::OutOfOrder => f.write_str("days are not in ascending order"),
        }
    }
}

impl PlanTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Compares the `Day` column against `1..=total_days` in the given numbering.
    pub fn day_issues(&self, numbering: DayNumbering, total_days: u32) -> Vec<DayIssue> {
        let expected: Vec<String> = (1..=total_days).map(|d| numbering.label(d)).collect();
        let actual: Vec<&str> = self.rows.iter().map(|r| r.day.trim()).collect();

        let mut issues = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for day in &actual {
            if !expected.iter().any(|e| e == day) {
                issues.push(DayIssue::Unexpected(day.to_string()));
            } else if !seen.insert(*day) {
                issues.push(DayIssue::Duplicate(day.to_string()));
            }
        }
        for day in &expected {
            if !seen.contains(day.as_str()) {
                issues.push(DayIssue::Missing(day.clone()));
            }
        }

        let positions: Vec<usize> = actual
            .iter()
            .filter_map(|day| expected.iter().position(|e| e == day))
            .collect();
        if positions.windows(2).any(|w| w[0] > w[1]) {
            issues.push(DayIssue::OutOfOrder);
        }
        issues
    }
}
