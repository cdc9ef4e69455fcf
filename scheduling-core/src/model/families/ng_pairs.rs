//! F7 NG pairs — §4.3. `Hard`: the two staff never both work the same day.
//! `Soft`: allowed, but penalized per co-working day via a witness variable.

use crate::config::raw::NgKind;
use crate::config::NormalizedConfig;
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;
use crate::solver::backend::Backend;

pub fn add_ng_pairs(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    objective: &mut ObjectiveComposer,
) {
    for pair in &cfg.ng_pairs {
        for d in 0..cfg.calendar.days.len() {
            let mut terms: Vec<_> = cfg
                .universe
                .work_ids()
                .map(|w| (vars.x(pair.a, d, w), 1))
                .collect();
            terms.extend(cfg.universe.work_ids().map(|w| (vars.x(pair.b, d, w), 1)));

            match pair.kind {
                NgKind::Hard => backend.add_le(&terms, 1),
                NgKind::Soft => {
                    let both = backend.new_binary();
                    terms.push((both, -1));
                    backend.add_le(&terms, 1);
                    objective.add_scaled(both, -100.0);
                }
            }
        }
    }
}
