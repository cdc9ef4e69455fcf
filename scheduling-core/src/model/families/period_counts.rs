//! F9 period counts — §4.3: hopes always dominate the configured target upward.

use crate::config::normalize::HopeTokenN;
use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_period_counts(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for (&(s, t), &count) in &cfg.period_counts {
        let hope_count = cfg
            .hopes
            .iter()
            .filter(|(&(hs, _), token)| hs == s && matches!(token, HopeTokenN::Concrete(ht) if *ht == t))
            .count() as u32;
        let target = count.max(hope_count);

        let terms: Vec<_> = (0..cfg.calendar.days.len())
            .map(|d| (vars.x(s, d, t), 1))
            .collect();
        backend.add_eq(&terms, target as i64);
    }
}
