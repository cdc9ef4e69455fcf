//! F16 preference nudges and F17 tie-breaker — §4.3, objective-only.

use crate::config::normalize::VacancyPolicyN;
use crate::config::raw::Preference;
use crate::config::{NormalizedConfig, ShiftKind, ShiftTypeId};
use crate::model::families::vacancy::staff_in_scope;
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;

fn preference_weight(cfg: &NormalizedConfig, s: usize, w: ShiftTypeId) -> f64 {
    match cfg.staff[s].preference.get(&w).copied().unwrap_or(Preference::Med) {
        Preference::High => 1.0,
        Preference::Med => 0.0,
        Preference::Low => -1.0,
    }
}

pub fn add_preference_nudges(cfg: &NormalizedConfig, vars: &VariableGrid, objective: &mut ObjectiveComposer) {
    for s in 0..cfg.staff.len() {
        for w in cfg.universe.work_ids() {
            let weight = preference_weight(cfg, s, w);
            if weight == 0.0 {
                continue;
            }
            for d in 0..cfg.calendar.days.len() {
                objective.add_scaled(vars.x(s, d, w), weight);
            }
        }
    }
}

/// `true` iff `(s, t)` already carries an F15 or F16 objective weight,
/// independent of day — i.e. every cell the tie-breaker (F17) must skip per
/// "for every variable not already weighted" (§4.3).
fn already_weighted(cfg: &NormalizedConfig, s: usize, t: ShiftTypeId) -> bool {
    if cfg.universe.info(t).kind == ShiftKind::Work && preference_weight(cfg, s, t) != 0.0 {
        return true;
    }
    if let VacancyPolicyN::AssignSpecific { candidates, scope } = &cfg.vacancy_policy {
        if staff_in_scope(cfg, s, scope) && candidates.contains(&t) {
            return true;
        }
    }
    false
}

/// F17. Every variable not excluded (`Vacant`) or already weighted by F15/F16
/// gets a small positive nudge so ties in the rest of the objective don't
/// propagate into arbitrary backend choices.
pub fn add_tie_breaker(cfg: &NormalizedConfig, vars: &VariableGrid, objective: &mut ObjectiveComposer) {
    let vacant = cfg.universe.vacant_id();
    for s in 0..cfg.staff.len() {
        for t in cfg.universe.all_ids() {
            if Some(t) == vacant || already_weighted(cfg, s, t) {
                continue;
            }
            for d in 0..cfg.calendar.days.len() {
                objective.add_scaled(vars.x(s, d, t), 0.01);
            }
        }
    }
}
