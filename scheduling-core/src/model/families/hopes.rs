//! F4 hope entries — §4.3. A per-(staff,day) wish, hard-enforced.

use crate::config::normalize::HopeTokenN;
use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_hopes(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    for (&(s, d), token) in &cfg.hopes {
        apply_token(cfg, vars, backend, s, d, token, true);
    }
}

/// Shared by F4 and F5 (weekday `Must`/`Forbid` is the same shape, negated).
pub fn apply_token(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    s: usize,
    d: usize,
    token: &HopeTokenN,
    must: bool,
) {
    let rhs = if must { 1 } else { 0 };
    match token {
        HopeTokenN::AnyHoliday => {
            let terms: Vec<_> = cfg.universe.holiday_ids().map(|h| (vars.x(s, d, h), 1)).collect();
            backend.add_eq(&terms, rhs);
        }
        HopeTokenN::AnyWork => {
            let terms: Vec<_> = cfg.universe.work_ids().map(|w| (vars.x(s, d, w), 1)).collect();
            backend.add_eq(&terms, rhs);
        }
        HopeTokenN::Concrete(t) => {
            backend.add_eq(&[(vars.x(s, d, *t), 1)], rhs);
        }
    }
}
