//! F10 consecutive-work limit — §4.3: a sliding window of `k+1` days may
//! contain at most `k` work assignments, for any work shift, honoring the
//! pre-horizon run carried in via `prevConsecWork`.

use crate::config::NormalizedConfig;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_consecutive_work(cfg: &NormalizedConfig, vars: &VariableGrid, backend: &mut Backend) {
    let day_count = cfg.calendar.days.len();

    for (s, staff) in cfg.staff.iter().enumerate() {
        let k = if staff.max_consec_work == 0 {
            cfg.global_max_consec
        } else {
            staff.max_consec_work
        };
        let l = (k + 1) as usize;

        let p = staff.prev_consec_work as usize;
        if p > 0 && l > p {
            let window_end = (l - p).min(day_count);
            let terms = work_terms(cfg, vars, s, 0, window_end);
            backend.add_le(&terms, (l - p - 1) as i64);
        }

        if l == 0 || day_count < l {
            continue;
        }
        for start in 0..=(day_count - l) {
            let terms = work_terms(cfg, vars, s, start, start + l);
            backend.add_le(&terms, k as i64);
        }
    }
}

fn work_terms(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    s: usize,
    from: usize,
    to: usize,
) -> Vec<(crate::solver::backend::VarHandle, i64)> {
    (from..to)
        .flat_map(|d| cfg.universe.work_ids().map(move |w| (vars.x(s, d, w), 1)))
        .collect()
}
