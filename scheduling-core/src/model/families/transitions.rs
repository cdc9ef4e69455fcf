//! F8 forbidden transitions — §4.3: a `(prev, next)` pair may not land on
//! consecutive days for the same staff, including the synthetic transition
//! from `staff.prevShiftType` into day 0.

use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_forbidden_transitions(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    let day_count = cfg.calendar.days.len();
    for t in &cfg.forbidden_transitions {
        for s in 0..cfg.staff.len() {
            for d in 0..day_count.saturating_sub(1) {
                backend.add_le(&[(vars.x(s, d, t.prev), 1), (vars.x(s, d + 1, t.next), 1)], 1);
            }

            if day_count > 0 && cfg.staff[s].prev_shift_type == Some(t.prev) {
                backend.add_eq(&[(vars.x(s, 0, t.next), 1)], 0);
            }
        }
    }
}
