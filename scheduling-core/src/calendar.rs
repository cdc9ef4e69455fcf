//! Calendar: expands a `[start, end]` date range into days, Sunday-anchored
//! weeks and calendar months.
//!
//! Grounded on the teacher's week-boundary arithmetic in
//! `domain/rules/{min,max}_days_off_rule.rs` (`get_week_start`), generalized
//! from a Monday anchor to the spec's Sunday anchor and extended to also
//! produce month groupings and a public-holiday predicate hook.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{EngineError, EngineResult};

/// A single calendar day in the scheduling horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    /// 0 = Monday … 6 = Sunday, matching the spec's weekday index.
    pub weekday: u8,
    pub is_public_holiday: bool,
}

impl Day {
    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A maximal contiguous run of `Day`s sharing the same Sunday-anchored week key.
#[derive(Debug, Clone)]
pub struct Week {
    pub days: Vec<Day>,
}

impl Week {
    /// A week is full iff it has exactly 7 days in the horizon.
    pub fn is_full(&self) -> bool {
        self.days.len() == 7
    }
}

/// A contiguous run of `Day`s sharing `(year, month)`.
#[derive(Debug, Clone)]
pub struct Month {
    pub year: i32,
    pub month: u32,
    pub days: Vec<Day>,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    pub days: Vec<Day>,
    pub weeks: Vec<Week>,
    pub months: Vec<Month>,
}

impl Calendar {
    /// Index of `date` within `days`, if it lies in the horizon.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }
}

/// Expand `[start, end]` (both inclusive) into days/weeks/months.
///
/// `is_public_holiday` is an injected, assumed-pure predicate — callers may
/// pass `|_| false` when no public-holiday calendar is wired up.
pub fn build_calendar(
    start: NaiveDate,
    end: NaiveDate,
    is_public_holiday: impl Fn(NaiveDate) -> bool,
) -> EngineResult<Calendar> {
    if end < start {
        return Err(EngineError::InvalidRange(format!(
            "end date {end} is before start date {start}"
        )));
    }

    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        days.push(Day {
            date: cursor,
            weekday: cursor.weekday().num_days_from_monday() as u8,
            is_public_holiday: is_public_holiday(cursor),
        });
        cursor += Duration::days(1);
    }

    let weeks = group_into_weeks(&days);
    let months = group_into_months(&days);

    Ok(Calendar { days, weeks, months })
}

/// Sunday-anchored week key: a day with weekday `w` (0=Mon..6=Sun) belongs to
/// the week anchored on the preceding Sunday, i.e. `d - ((w+1) mod 7)`.
fn week_anchor(day: &Day) -> NaiveDate {
    let offset = (day.weekday as i64 + 1) % 7;
    day.date - Duration::days(offset)
}

fn group_into_weeks(days: &[Day]) -> Vec<Week> {
    let mut weeks: Vec<Week> = Vec::new();
    let mut current_anchor: Option<NaiveDate> = None;

    for &day in days {
        let anchor = week_anchor(&day);
        match current_anchor {
            Some(a) if a == anchor => {
                weeks.last_mut().unwrap().days.push(day);
            }
            _ => {
                weeks.push(Week { days: vec![day] });
                current_anchor = Some(anchor);
            }
        }
    }

    weeks
}

fn group_into_months(days: &[Day]) -> Vec<Month> {
    let mut months: Vec<Month> = Vec::new();

    for &day in days {
        let (year, month) = (day.date.year(), day.date.month());
        match months.last_mut() {
            Some(m) if m.year == year && m.month == month => {
                m.days.push(day);
            }
            _ => {
                months.push(Month { year, month, days: vec![day] });
            }
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert!(build_calendar(start, end, |_| false).is_err());
    }

    #[test]
    fn test_day_count_and_labels() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let cal = build_calendar(start, end, |_| false).unwrap();
        assert_eq!(cal.days.len(), 3);
        assert_eq!(cal.days[0].label(), "2024-01-01");
    }

    #[test]
    fn test_partial_edge_weeks() {
        // 2024-01-01 is a Monday; horizon starts mid-week so the first week
        // should be partial (missing Sunday of the previous calendar week).
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let cal = build_calendar(start, end, |_| false).unwrap();
        assert!(!cal.weeks.first().unwrap().is_full());
        // Middle week(s) spanning a full Sun-Sat range should be full.
        assert!(cal.weeks.iter().any(|w| w.is_full()));
    }

    #[test]
    fn test_month_grouping() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let cal = build_calendar(start, end, |_| false).unwrap();
        assert_eq!(cal.months.len(), 2);
        assert_eq!(cal.months[0].days.len(), 2);
        assert_eq!(cal.months[1].days.len(), 2);
    }

    #[test]
    fn test_public_holiday_predicate_injected() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let cal = build_calendar(start, end, |d| d == start).unwrap();
        assert!(cal.days[0].is_public_holiday);
    }
}
