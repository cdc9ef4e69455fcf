//! Output types returned to the caller: the dense assignment table, warnings
//! surfaced by normalization and the post-solve validator, and infeasibility
//! causes surfaced by the diagnoser (§6).

use chrono::NaiveDate;

/// A dense `staff × day` table of shift-type names.
///
/// Row order preserves `Config.staff`; column order preserves calendrical
/// order. Layout beyond that (e.g. how a caller renders it) is delegated to
/// the caller — the engine does not know about tables, CSV or HTML.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub staff_names: Vec<String>,
    pub days: Vec<NaiveDate>,
    /// `cells[staff_row][day_col]` is the assigned shift-type name.
    pub cells: Vec<Vec<String>>,
}

impl Schedule {
    pub fn shift_for(&self, staff: &str, date: NaiveDate) -> Option<&str> {
        let row = self.staff_names.iter().position(|s| s == staff)?;
        let col = self.days.iter().position(|d| *d == date)?;
        Some(self.cells[row][col].as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UnknownToken,
    RequirementDeviation,
    HolidayQuotaMiss,
}

#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub day: Option<NaiveDate>,
    pub staff: Option<String>,
    pub shift: Option<String>,
    pub actual: Option<i64>,
    pub target: Option<i64>,
    pub message: String,
}

impl Warning {
    pub fn unknown_token(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnknownToken,
            day: None,
            staff: None,
            shift: None,
            actual: None,
            target: None,
            message: message.into(),
        }
    }
}

/// The family and location of a constraint that the diagnoser found to be
/// part of a minimal conflict set, plus a human-readable explanation.
#[derive(Debug, Clone)]
pub struct Cause {
    pub family: &'static str,
    pub tag: String,
    pub human_readable: String,
}
