//! F13 holiday order rules — §4.3: within a single week, `post` may not
//! precede `pre` for the same staff.

use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_holiday_order(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for rule in &cfg.holiday_order_rules {
        for week in &cfg.calendar.weeks {
            let day_idxs: Vec<usize> = week
                .days
                .iter()
                .filter_map(|day| cfg.calendar.index_of(day.date))
                .collect();

            for s in 0..cfg.staff.len() {
                for i in 0..day_idxs.len() {
                    for j in (i + 1)..day_idxs.len() {
                        backend.add_le(
                            &[
                                (vars.x(s, day_idxs[i], rule.post), 1),
                                (vars.x(s, day_idxs[j], rule.pre), 1),
                            ],
                            1,
                        );
                    }
                }
            }
        }
    }
}
