//! F14 public-holiday compensation — §4.3: cumulative `compHoliday` must
//! never outrun cumulative public-holiday work, and must equal it by the
//! last day of the horizon.

use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_public_holiday_compensation(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    let Some(rule) = &cfg.public_holiday_rule else {
        return;
    };
    let day_count = cfg.calendar.days.len();
    if day_count == 0 {
        return;
    }

    for (s, staff) in cfg.staff.iter().enumerate() {
        let matches = staff
            .employment_type
            .as_ref()
            .is_some_and(|et| rule.employment_types.contains(et));
        if !matches {
            continue;
        }

        for d in 0..day_count {
            let mut terms: Vec<_> = (0..=d).map(|d2| (vars.x(s, d2, rule.comp_holiday), 1)).collect();
            for d2 in 0..=d {
                if cfg.calendar.days[d2].is_public_holiday {
                    terms.extend(cfg.universe.work_ids().map(|w| (vars.x(s, d2, w), -1)));
                }
            }

            if d == day_count - 1 {
                backend.add_eq(&terms, 0);
            } else {
                backend.add_le(&terms, 0);
            }
        }
    }
}
