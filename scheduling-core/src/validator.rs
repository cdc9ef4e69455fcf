//! `Validator` (§4.6): walks a feasible `Schedule` and surfaces soft-family
//! deviations (holiday-quota misses, requirement shortfalls/overages) as
//! warnings. Never demotes a successful solve to a failure.

use crate::config::NormalizedConfig;
use crate::schedule::{Schedule, Warning, WarningKind};

pub fn validate(cfg: &NormalizedConfig, schedule: &Schedule) -> Vec<Warning> {
    let mut warnings = Vec::new();
    validate_requirements(cfg, schedule, &mut warnings);
    validate_weekly_quota(cfg, schedule, &mut warnings);
    validate_monthly_quota(cfg, schedule, &mut warnings);
    warnings
}

fn validate_requirements(cfg: &NormalizedConfig, schedule: &Schedule, warnings: &mut Vec<Warning>) {
    for d in 0..cfg.calendar.days.len() {
        let date = cfg.calendar.days[d].date;
        for w in cfg.universe.staffed_work_ids() {
            let req = cfg.requirements.get(&(d, w)).copied().unwrap_or(0);
            if req == 0 {
                continue;
            }
            let name = cfg.universe.name_of(w);
            let actual = schedule
                .cells
                .iter()
                .filter(|row| row.get(d).map(|s| s.as_str()) == Some(name))
                .count() as i64;
            if actual != req as i64 {
                warnings.push(Warning {
                    kind: WarningKind::RequirementDeviation,
                    day: Some(date),
                    staff: None,
                    shift: Some(name.to_string()),
                    actual: Some(actual),
                    target: Some(req as i64),
                    message: format!(
                        "requirement deviation on {date} for {name}: actual {actual}, target {req}"
                    ),
                });
            }
        }
    }
}

fn validate_weekly_quota(cfg: &NormalizedConfig, schedule: &Schedule, warnings: &mut Vec<Warning>) {
    for (s, staff) in cfg.staff.iter().enumerate() {
        for (&h, &q) in &staff.weekly_quota {
            let name = cfg.universe.name_of(h);
            for week in &cfg.calendar.weeks {
                let actual = week
                    .days
                    .iter()
                    .filter_map(|day| cfg.calendar.index_of(day.date))
                    .filter(|&d| schedule.cells[s].get(d).map(|c| c.as_str()) == Some(name))
                    .count() as i64;
                let deviates = if week.is_full() {
                    actual != q as i64
                } else {
                    actual > q as i64
                };
                if deviates {
                    warnings.push(Warning {
                        kind: WarningKind::HolidayQuotaMiss,
                        day: week.days.first().map(|d| d.date),
                        staff: Some(staff.name.clone()),
                        shift: Some(name.to_string()),
                        actual: Some(actual),
                        target: Some(q as i64),
                        message: format!(
                            "weekly {name} quota miss for {}: actual {actual}, target {q}",
                            staff.name
                        ),
                    });
                }
            }
        }
    }
}

fn validate_monthly_quota(cfg: &NormalizedConfig, schedule: &Schedule, warnings: &mut Vec<Warning>) {
    for (s, staff) in cfg.staff.iter().enumerate() {
        for (&h, &q) in &staff.monthly_quota {
            let name = cfg.universe.name_of(h);
            for month in &cfg.calendar.months {
                let actual = month
                    .days
                    .iter()
                    .filter_map(|day| cfg.calendar.index_of(day.date))
                    .filter(|&d| schedule.cells[s].get(d).map(|c| c.as_str()) == Some(name))
                    .count() as i64;
                if actual != q as i64 {
                    warnings.push(Warning {
                        kind: WarningKind::HolidayQuotaMiss,
                        day: month.days.first().map(|d| d.date),
                        staff: Some(staff.name.clone()),
                        shift: Some(name.to_string()),
                        actual: Some(actual),
                        target: Some(q as i64),
                        message: format!(
                            "monthly {name} quota miss for {}: actual {actual}, target {q}",
                            staff.name
                        ),
                    });
                }
            }
        }
    }
}
