//! F11 (weekly) and F12 (monthly) holiday quotas — §4.3.
//!
//! F11 deliberately keeps both a hard equality (full weeks) / hard ceiling
//! (partial weeks) *and* a soft absolute-difference penalty on the same
//! quantity — see §9 "F11 hard-plus-soft duplication", kept verbatim rather
//! than simplified to one form (DESIGN.md records this as a resolved open
//! question, not an oversight).

use crate::config::NormalizedConfig;
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_weekly_quota(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    objective: &mut ObjectiveComposer,
) {
    for (s, staff) in cfg.staff.iter().enumerate() {
        for (&h, &q) in &staff.weekly_quota {
            for week in &cfg.calendar.weeks {
                let day_idxs: Vec<usize> = week
                    .days
                    .iter()
                    .filter_map(|day| cfg.calendar.index_of(day.date))
                    .collect();
                let terms: Vec<_> = day_idxs.iter().map(|&d| (vars.x(s, d, h), 1)).collect();

                if week.is_full() {
                    backend.add_eq(&terms, q as i64);

                    let over = backend.new_bounded_int(0, 7);
                    let under = backend.new_bounded_int(0, 7);
                    let mut soft_terms = terms;
                    soft_terms.push((under, 1));
                    soft_terms.push((over, -1));
                    backend.add_eq(&soft_terms, q as i64);
                    objective.add_scaled(over, -1000.0);
                    objective.add_scaled(under, -1000.0);
                } else {
                    backend.add_le(&terms, q as i64);

                    let over = backend.new_bounded_int(0, 7);
                    let mut soft_terms = terms;
                    soft_terms.push((over, -1));
                    backend.add_le(&soft_terms, q as i64);
                    objective.add_scaled(over, -1000.0);
                }
            }
        }
    }
}

pub fn add_monthly_quota(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    objective: &mut ObjectiveComposer,
) {
    for (s, staff) in cfg.staff.iter().enumerate() {
        for (&h, &q) in &staff.monthly_quota {
            for month in &cfg.calendar.months {
                let day_idxs: Vec<usize> = month
                    .days
                    .iter()
                    .filter_map(|day| cfg.calendar.index_of(day.date))
                    .collect();
                let bound = day_idxs.len() as i32;
                let over = backend.new_bounded_int(0, bound);
                let under = backend.new_bounded_int(0, bound);

                let mut terms: Vec<_> = day_idxs.iter().map(|&d| (vars.x(s, d, h), 1)).collect();
                terms.push((under, 1));
                terms.push((over, -1));
                backend.add_eq(&terms, q as i64);

                objective.add_scaled(over, -500.0);
                objective.add_scaled(under, -500.0);
            }
        }
    }
}
