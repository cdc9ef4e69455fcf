//! `Diagnoser` (§4.5): on `INFEASIBLE`, rebuilds a relaxed twin model where
//! every softenable family instance gains a boolean (or, for F10, integer)
//! violation witness, minimizes their sum, and reports which instances were
//! actually violated as human-readable causes.
//!
//! Softenable families per §4.3/§4.5: F4 (hopes), F5 (weekday rules), F7-hard
//! (NG pairs), F8 (forbidden transitions), F10 (consecutive work), and F3 for
//! `req = 0`. Every other hard family (F1, F2, F6, F9, F11-hard, F13, F14) is
//! rebuilt exactly as in the normal model — the diagnoser never softens a
//! family the spec doesn't name.
//!
//! The violation-variable ↔ human-readable-cause mapping is built as a
//! parallel array while constraints are added (§9 "Diagnoser variable
//! naming"), never reconstructed after the fact from variable identity.

use crate::config::normalize::HopeTokenN;
use crate::config::raw::{NgKind, RuleKind};
use crate::config::NormalizedConfig;
use crate::model::families::{
    assignment, consecutive, global_rules, holiday_order, holiday_quota, period_counts,
    public_holiday,
};
use crate::model::objective::ObjectiveComposer;
use crate::model::variables::VariableGrid;
use crate::schedule::Cause;
use crate::solver::backend::{Backend, BackendOutcome, Solution2, VarHandle};
use crate::solver::driver::SolverDriver;

/// `timeout_secs` is the Diagnoser's own timeout (§4.5), independent of the
/// timeout that governed the original infeasible solve.
pub fn diagnose(cfg: &NormalizedConfig, timeout_secs: u64) -> Vec<Cause> {
    let mut backend = Backend::new();
    let vars = VariableGrid::build(cfg, &mut backend);
    let mut witnesses: Vec<(VarHandle, Cause)> = Vec::new();

    // Non-softenable hard families, rebuilt unchanged.
    assignment::add_exactly_one(cfg, &vars, &mut backend);
    assignment::add_capability(cfg, &vars, &mut backend);
    global_rules::add_global_rules(cfg, &vars, &mut backend);
    period_counts::add_period_counts(cfg, &vars, &mut backend);
    holiday_order::add_holiday_order(cfg, &vars, &mut backend);
    public_holiday::add_public_holiday_compensation(cfg, &vars, &mut backend);
    // F11/F12 keep their hard ceiling/equality; their soft terms are
    // harmless here since the diagnoser's objective never references them.
    let mut unused = ObjectiveComposer::new();
    holiday_quota::add_weekly_quota(cfg, &vars, &mut backend, &mut unused);
    holiday_quota::add_monthly_quota(cfg, &vars, &mut backend, &mut unused);

    // Softenable families, witnessed.
    witness_hopes(cfg, &vars, &mut backend, &mut witnesses);
    witness_weekday_rules(cfg, &vars, &mut backend, &mut witnesses);
    witness_ng_hard_pairs(cfg, &vars, &mut backend, &mut witnesses);
    witness_forbidden_transitions(cfg, &vars, &mut backend, &mut witnesses);
    witness_consecutive_work(cfg, &vars, &mut backend, &mut witnesses);
    witness_zero_requirement(cfg, &vars, &mut backend, &mut witnesses);

    let witness_vars: Vec<VarHandle> = witnesses.iter().map(|(v, _)| *v).collect();
    backend.minimize_sum(&witness_vars);

    let driver = SolverDriver::new(timeout_secs);
    match driver.solve(backend, None) {
        crate::solver::driver::SolveStatus::Solved(solution) => witnesses
            .into_iter()
            .filter(|(v, _)| solution.value_of(*v) > 0)
            .map(|(_, cause)| cause)
            .collect(),
        _ => Vec::new(),
    }
}

fn witness_hopes(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    for (&(s, d), token) in &cfg.hopes {
        let (terms, rhs) = token_terms(cfg, vars, s, d, token, true);
        let w = backend.new_binary();
        backend.add_eq_unless(&terms, rhs, w);
        witnesses.push((
            w,
            Cause {
                family: "F4",
                tag: format!("hope:{s}:{d}"),
                human_readable: format!(
                    "hope: {} on {} ({})",
                    cfg.staff[s].name,
                    cfg.calendar.days[d].label(),
                    token_label(cfg, token)
                ),
            },
        ));
    }
}

fn witness_weekday_rules(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    for rule in &cfg.weekday_rules {
        let must = matches!(rule.kind, RuleKind::Must);
        for (d, day) in cfg.calendar.days.iter().enumerate() {
            let matches = match rule.weekday {
                Some(w) => day.weekday == w,
                None => true,
            };
            if !matches {
                continue;
            }
            let (terms, rhs) = token_terms(cfg, vars, rule.staff, d, &rule.token, must);
            let w = backend.new_binary();
            backend.add_eq_unless(&terms, rhs, w);
            witnesses.push((
                w,
                Cause {
                    family: "F5",
                    tag: format!("weekday-rule:{}:{d}", rule.staff),
                    human_readable: format!(
                        "weekday rule: {} on {} ({})",
                        cfg.staff[rule.staff].name,
                        day.label(),
                        token_label(cfg, &rule.token)
                    ),
                },
            ));
        }
    }
}

fn witness_ng_hard_pairs(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    for pair in &cfg.ng_pairs {
        if !matches!(pair.kind, NgKind::Hard) {
            continue;
        }
        for d in 0..cfg.calendar.days.len() {
            let mut terms: Vec<_> = cfg.universe.work_ids().map(|w| (vars.x(pair.a, d, w), 1)).collect();
            terms.extend(cfg.universe.work_ids().map(|w| (vars.x(pair.b, d, w), 1)));
            let w = backend.new_binary();
            backend.add_le_unless(&terms, 1, w);
            witnesses.push((
                w,
                Cause {
                    family: "F7",
                    tag: format!("ng-pair:{}:{}:{d}", pair.a, pair.b),
                    human_readable: format!(
                        "NG pair: {} & {} both working on {}",
                        cfg.staff[pair.a].name,
                        cfg.staff[pair.b].name,
                        cfg.calendar.days[d].label()
                    ),
                },
            ));
        }
    }
}

fn witness_forbidden_transitions(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    let day_count = cfg.calendar.days.len();
    for t in &cfg.forbidden_transitions {
        for s in 0..cfg.staff.len() {
            for d in 0..day_count.saturating_sub(1) {
                let w = backend.new_binary();
                backend.add_le_unless(&[(vars.x(s, d, t.prev), 1), (vars.x(s, d + 1, t.next), 1)], 1, w);
                witnesses.push((
                    w,
                    Cause {
                        family: "F8",
                        tag: format!("forbidden-transition:{s}:{d}"),
                        human_readable: format!(
                            "forbidden-transition: {} {}({})→{}({})",
                            cfg.staff[s].name,
                            cfg.calendar.days[d].label(),
                            cfg.universe.name_of(t.prev),
                            cfg.calendar.days[d + 1].label(),
                            cfg.universe.name_of(t.next)
                        ),
                    },
                ));
            }

            if day_count > 0 && cfg.staff[s].prev_shift_type == Some(t.prev) {
                let w = backend.new_binary();
                backend.add_eq_unless(&[(vars.x(s, 0, t.next), 1)], 0, w);
                witnesses.push((
                    w,
                    Cause {
                        family: "F8",
                        tag: format!("forbidden-transition:{s}:pre-horizon"),
                        human_readable: format!(
                            "forbidden-transition: {} prev({})→{}({})",
                            cfg.staff[s].name,
                            cfg.universe.name_of(t.prev),
                            cfg.calendar.days[0].label(),
                            cfg.universe.name_of(t.next)
                        ),
                    },
                ));
            }
        }
    }
}

/// F10's witness is an integer slack rather than a boolean (§4.5): the window
/// sum may exceed `k` by up to the slack's value, at a one-for-one cost in
/// the minimized objective.
fn witness_consecutive_work(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    let day_count = cfg.calendar.days.len();
    for (s, staff) in cfg.staff.iter().enumerate() {
        let k = if staff.max_consec_work == 0 {
            cfg.global_max_consec
        } else {
            staff.max_consec_work
        };
        let l = (k + 1) as usize;
        if l == 0 || day_count < l {
            continue;
        }
        for start in 0..=(day_count - l) {
            let mut terms: Vec<_> = (start..start + l)
                .flat_map(|d| cfg.universe.work_ids().map(move |w| (vars.x(s, d, w), 1)))
                .collect();
            let slack = backend.new_bounded_int(0, l as i32);
            terms.push((slack, -1));
            backend.add_le(&terms, k as i64);
            witnesses.push((
                slack,
                Cause {
                    family: "F10",
                    tag: format!("consec:{s}:{start}"),
                    human_readable: format!(
                        "consec: {} from {}",
                        staff.name,
                        cfg.calendar.days[start].label()
                    ),
                },
            ));
        }
    }
}

fn witness_zero_requirement(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    backend: &mut Backend,
    witnesses: &mut Vec<(VarHandle, Cause)>,
) {
    for d in 0..cfg.calendar.days.len() {
        for w in cfg.universe.staffed_work_ids() {
            let req = cfg.requirements.get(&(d, w)).copied().unwrap_or(0);
            if req != 0 {
                continue;
            }
            let terms: Vec<_> = (0..cfg.staff.len()).map(|s| (vars.x(s, d, w), 1)).collect();
            let witness = backend.new_binary();
            backend.add_eq_unless(&terms, 0, witness);
            witnesses.push((
                witness,
                Cause {
                    family: "F3",
                    tag: format!("requirement-zero:{d}:{w}"),
                    human_readable: format!(
                        "requirement: unsolicited {} assignment on {}",
                        cfg.universe.name_of(w),
                        cfg.calendar.days[d].label()
                    ),
                },
            ));
        }
    }
}

fn token_terms(
    cfg: &NormalizedConfig,
    vars: &VariableGrid,
    s: usize,
    d: usize,
    token: &HopeTokenN,
    must: bool,
) -> (Vec<(VarHandle, i64)>, i64) {
    let rhs = if must { 1 } else { 0 };
    let terms = match token {
        HopeTokenN::AnyHoliday => cfg.universe.holiday_ids().map(|h| (vars.x(s, d, h), 1)).collect(),
        HopeTokenN::AnyWork => cfg.universe.work_ids().map(|w| (vars.x(s, d, w), 1)).collect(),
        HopeTokenN::Concrete(t) => vec![(vars.x(s, d, *t), 1)],
    };
    (terms, rhs)
}

fn token_label(cfg: &NormalizedConfig, token: &HopeTokenN) -> String {
    match token {
        HopeTokenN::AnyHoliday => "AnyHoliday".to_string(),
        HopeTokenN::AnyWork => "AnyWork".to_string(),
        HopeTokenN::Concrete(t) => cfg.universe.name_of(*t).to_string(),
    }
}
