//! F1 (exactly-one), F2 (capability) and F3 (requirement) — §4.3.

use crate::config::NormalizedConfig;
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

/// F1. `Σ_t x[s,d,t] = 1` for every `(s,d)`.
pub fn add_exactly_one(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for s in 0..cfg.staff.len() {
        for d in 0..cfg.calendar.days.len() {
            let terms: Vec<_> = vars.cell(s, d).map(|v| (v, 1)).collect();
            backend.add_eq(&terms, 1);
        }
    }
}

/// F2. Staffed work shifts the staff is not `able` for are pinned to 0.
/// Non-staffed ("training") shifts and holidays are never restricted here.
pub fn add_capability(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for (s, staff) in cfg.staff.iter().enumerate() {
        for w in cfg.universe.staffed_work_ids() {
            if !staff.able_shifts.contains(&w) {
                for d in 0..cfg.calendar.days.len() {
                    backend.add_eq(&[(vars.x(s, d, w), 1)], 0);
                }
            }
        }
    }
}

/// F3. Requirement: hard `a = 0` when `req = 0`; otherwise soft
/// `−10000 · |a − req|` via a pair of non-negative slack variables.
pub fn add_requirement(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    objective: &mut ObjectiveComposer,
) {
    let staff_count = cfg.staff.len() as i32;
    for d in 0..cfg.calendar.days.len() {
        for w in cfg.universe.staffed_work_ids() {
            let req = cfg.requirements.get(&(d, w)).copied().unwrap_or(0);
            let assigned: Vec<_> = (0..cfg.staff.len()).map(|s| (vars.x(s, d, w), 1)).collect();

            if req == 0 {
                backend.add_eq(&assigned, 0);
                continue;
            }

            let over = backend.new_bounded_int(0, staff_count);
            let under = backend.new_bounded_int(0, staff_count);
            let mut terms = assigned;
            terms.push((under, 1));
            terms.push((over, -1));
            backend.add_eq(&terms, req as i64);

            objective.add_scaled(over, -10000.0);
            objective.add_scaled(under, -10000.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::raw::*;
    use crate::config::{normalize, RawConfig};
    use crate::model::builder::ModelBuilder;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn two_staff_three_days() -> RawConfig {
        RawConfig {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            work_shifts: vec![WorkShiftDef { name: "Day".into(), staffed_flag: true }],
            holiday_types: vec![HolidayTypeDef { name: "Off".into(), fixed_quota: false }],
            employment_types: vec![],
            global_max_consec: 5,
            forbidden_transitions: vec![],
            ng_pairs: vec![],
            staff: vec![
                RawStaff {
                    name: "Alice".into(),
                    employment_type: None,
                    able: HashMap::new(),
                    preference: HashMap::new(),
                    max_consec_work: 0,
                    prev_consec_work: 0,
                    prev_shift_type: None,
                    holiday_quota: HashMap::new(),
                },
                RawStaff {
                    name: "Bob".into(),
                    employment_type: None,
                    able: HashMap::new(),
                    preference: HashMap::new(),
                    max_consec_work: 0,
                    prev_consec_work: 0,
                    prev_shift_type: None,
                    holiday_quota: HashMap::new(),
                },
            ],
            requirements: HashMap::new(),
            hopes: HashMap::new(),
            weekday_rules: vec![],
            global_rules: vec![],
            public_holiday_rule: PublicHolidayRule::default(),
            holiday_order_rules: vec![],
            period_counts: HashMap::new(),
            vacancy_policy: VacancyPolicy::KeepBlank,
            solver_timeout_secs: 0,
        }
    }

    #[test]
    fn test_exactly_one_and_capability_build_without_panicking() {
        let raw = two_staff_three_days();
        let (cfg, _) = normalize(raw, |_| false).unwrap();
        let mut builder = ModelBuilder::new(&cfg);
        add_exactly_one(&cfg, builder.vars(), builder.backend_mut());
        add_capability(&cfg, builder.vars(), builder.backend_mut());
    }
}
