//! F15 vacancy steering — §4.3, objective-only. The numeric constants are
//! part of the contract ("candidate order matters" — §9); do not round or
//! reorder them.

use crate::config::normalize::{VacancyPolicyN, VacancyScopeN};
use crate::config::NormalizedConfig;
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;

pub fn add_vacancy_steering(cfg: &NormalizedConfig, vars: &VariableGrid, objective: &mut ObjectiveComposer) {
    let Some(vacant) = cfg.universe.vacant_id() else {
        return;
    };

    match &cfg.vacancy_policy {
        VacancyPolicyN::KeepBlank => {
            for s in 0..cfg.staff.len() {
                for d in 0..cfg.calendar.days.len() {
                    objective.add_scaled(vars.x(s, d, vacant), 0.2);
                }
            }
        }
        VacancyPolicyN::AssignSpecific { candidates, scope } => {
            for s in 0..cfg.staff.len() {
                let in_scope = staff_in_scope(cfg, s, scope);
                for d in 0..cfg.calendar.days.len() {
                    if in_scope {
                        objective.add_scaled(vars.x(s, d, vacant), -0.02);
                        for (i, &cand) in candidates.iter().enumerate() {
                            let weight = (0.24 - 0.02 * i as f64).max(0.06);
                            objective.add_scaled(vars.x(s, d, cand), weight);
                        }
                    } else {
                        objective.add_scaled(vars.x(s, d, vacant), 0.2);
                    }
                }
            }
        }
    }
}

pub(crate) fn staff_in_scope(cfg: &NormalizedConfig, s: usize, scope: &VacancyScopeN) -> bool {
    match scope {
        VacancyScopeN::All => true,
        VacancyScopeN::Employment(e) => cfg.staff[s].employment_type.as_deref() == Some(e.as_str()),
        VacancyScopeN::Staff(id) => *id == s,
    }
}
