//! F6 global rules — §4.3: on matching days, matching staff may only take the
//! named holiday among `HolidayTypes` (work remains free unless forbidden
//! elsewhere).

use crate::config::normalize::GlobalRuleScopeN;
use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_global_rules(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for rule in &cfg.global_rules {
        for (d, day) in cfg.calendar.days.iter().enumerate() {
            let day_matches = match rule.scope {
                GlobalRuleScopeN::Weekday(w) => day.weekday == w,
                GlobalRuleScopeN::Date(date_idx) => date_idx == d,
            };
            if !day_matches {
                continue;
            }
            for (s, staff) in cfg.staff.iter().enumerate() {
                let staff_matches = match &rule.employment_type_filter {
                    None => true,
                    Some(filter) => staff.employment_type.as_deref() == Some(filter.as_str()),
                };
                if !staff_matches {
                    continue;
                }
                for h in cfg.universe.holiday_ids() {
                    if h != rule.holiday {
                        backend.add_eq(&[(vars.x(s, d, h), 1)], 0);
                    }
                }
            }
        }
    }
}
