//! F5 weekday rules — §4.3. `Must` reuses F4's shape; `Forbid` is its negation.

use crate::config::raw::RuleKind;
use crate::config::NormalizedConfig;
use crate::model::families::hopes::apply_token;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_weekday_rules(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for rule in &cfg.weekday_rules {
        let must = matches!(rule.kind, RuleKind::Must);
        for (d, day) in cfg.calendar.days.iter().enumerate() {
            let matches_weekday = match rule.weekday {
                Some(w) => day.weekday == w,
                None => true,
            };
            if matches_weekday {
                apply_token(cfg, vars, backend, rule.staff, d, &rule.token, must);
            }
        }
    }
}
