//! Shift-scheduling core: a constraint-programming engine that assigns,
//! for every `(staff, day)` cell over a contiguous date range, exactly one
//! shift type subject to a rich set of hard and soft constraints.
//!
//! [`solve`] is the single entry point: `RawConfig → ConfigNormalizer →
//! ModelBuilder/ObjectiveComposer → SolverDriver → (Validator | Diagnoser)`
//! (§2). Everything upstream of `RawConfig` (the editing surface,
//! persistence, CSV/HTML export) and downstream of `Schedule` is an external
//! collaborator this crate knows nothing about — it is embedded as a library,
//! never run as a server.

pub mod calendar;
pub mod config;
pub mod diagnoser;
pub mod model;
pub mod schedule;
pub mod signature;
pub mod solver;
pub mod validator;

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, instrument};

// `crate::` is required here, not just stylistic: this crate both depends on
// the external `config` crate (see `config::settings`) and declares its own
// `crate::config` module, and a bare `config::` path at the crate root is
// ambiguous between the two.
pub use crate::config::{EngineSettings, RawConfig};
pub use schedule::{Cause, Schedule, Warning, WarningKind};
pub use shared::{EngineError, EngineResult};
pub use signature::InputSignature;
pub use solver::SolveProgress;

use solver::Solution2;

use model::ModelBuilder;
use solver::{SolveStatus, SolverDriver};

/// A callback the driver invokes on its worker-poll cadence (§4.4, §9
/// "Thread + polling loop for progress") so an embedding UI can render a
/// progress bar without this crate depending on any UI toolkit.
pub type ProgressSink = Box<dyn Fn(SolveProgress) + Send>;

/// Per-solve knobs that are not part of the business `RawConfig` payload.
#[derive(Default)]
pub struct SolveOptions {
    /// Invoked with a fresh [`SolveProgress`] snapshot on every poll tick.
    pub progress: Option<ProgressSink>,
    /// Injected public-holiday predicate (§4.1); defaults to "no public
    /// holidays" when absent. Assumed pure, as the spec requires.
    pub is_public_holiday: Option<Box<dyn Fn(NaiveDate) -> bool + Send>>,
    /// Ambient engine tuning (§9 "Engine settings"); defaults to
    /// [`EngineSettings::default`] when absent so embedders that don't ship a
    /// `config/` directory still get sane behavior.
    pub settings: Option<EngineSettings>,
}

/// The outcome of a solve that completed without an internal error.
///
/// `InternalError` is deliberately not a variant here — it is returned as
/// `Err(EngineError::Internal(..))` instead, since it is not a business
/// outcome a caller should branch ordinary control flow on (§6, §7).
pub enum SolveOutcome {
    Solved { schedule: Schedule, warnings: Vec<Warning> },
    Infeasible { causes: Vec<Cause> },
    Timeout,
}

/// Runs one full solve: normalize, build the model, solve it, and either
/// validate (on success) or diagnose (on infeasibility) the result.
#[instrument(skip(config, options), fields(start = %config.start, end = %config.end))]
pub fn solve(config: RawConfig, options: SolveOptions) -> EngineResult<SolveOutcome> {
    let settings = options.settings.unwrap_or_default();
    let is_public_holiday = options
        .is_public_holiday
        .unwrap_or_else(|| Box::new(|_| false));

    let timeout_secs = if config.solver_timeout_secs == 0 {
        settings.default_solver_timeout_secs
    } else {
        config.solver_timeout_secs
    };

    info!("engine: normalizing config");
    let (normalized, mut warnings) = crate::config::normalize(config, |d| is_public_holiday(d))?;

    info!(
        staff = normalized.staff.len(),
        days = normalized.calendar.days.len(),
        "engine: building model"
    );
    let (backend, vars) = ModelBuilder::new(&normalized).build(&normalized);

    let driver = SolverDriver::with_poll_interval(
        timeout_secs,
        Duration::from_millis(settings.worker_poll_interval_millis),
    );
    let on_tick = options.progress.map(|sink| {
        move |p: &SolveProgress| sink(p.clone())
    });
    let status = driver.solve(
        backend,
        on_tick
            .as_ref()
            .map(|f| f as &dyn Fn(&SolveProgress))
            .as_deref(),
    );

    match status {
        SolveStatus::Solved(solution) => {
            let schedule = schedule_from_solution(&normalized, &vars, solution.as_ref());
            let mut validation_warnings = validator::validate(&normalized, &schedule);
            warnings.append(&mut validation_warnings);
            info!(warnings = warnings.len(), "engine: solved");
            Ok(SolveOutcome::Solved { schedule, warnings })
        }
        SolveStatus::Infeasible => {
            info!("engine: infeasible, running diagnoser");
            let causes = diagnoser::diagnose(&normalized, settings.diagnoser_timeout_secs);
            Ok(SolveOutcome::Infeasible { causes })
        }
        SolveStatus::Timeout => {
            info!("engine: timed out");
            Ok(SolveOutcome::Timeout)
        }
        SolveStatus::Internal(msg) => Err(shared::EngineError::Internal(msg)),
    }
}

/// Wraps §4.7 independent of solving, e.g. so a caller can decide whether a
/// previous [`Schedule`] is still valid before paying for a re-solve.
pub fn compute_signature(config: &RawConfig) -> InputSignature {
    signature::compute_signature(config)
}

fn schedule_from_solution(
    cfg: &crate::config::NormalizedConfig,
    vars: &model::VariableGrid,
    solution: &dyn Solution2,
) -> Schedule {
    let staff_names: Vec<String> = cfg.staff.iter().map(|s| s.name.clone()).collect();
    let days: Vec<NaiveDate> = cfg.calendar.days.iter().map(|d| d.date).collect();

    let mut cells = Vec::with_capacity(staff_names.len());
    for s in 0..staff_names.len() {
        let mut row = Vec::with_capacity(days.len());
        for d in 0..days.len() {
            let assigned = cfg
                .universe
                .all_ids()
                .find(|&t| solution.value_of(vars.x(s, d, t)) > 0)
                .map(|t| cfg.universe.name_of(t).to_string())
                .unwrap_or_default();
            row.push(assigned);
        }
        cells.push(row);
    }

    Schedule { staff_names, days, cells }
}

/// Installs a `tracing_subscriber` registry for this crate's own tests and
/// example binary. Never called from library code paths a caller's process
/// might also initialize tracing in — a library must not steal
/// `tracing_subscriber::registry().init()` from its embedder (§9 "Logging").
#[cfg(any(test, feature = "examples"))]
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduling_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::raw::*;
    use std::collections::HashMap;

    /// `req_per_day` is applied uniformly to every one of the 3 days (S1, §8).
    fn two_staff_three_days(req_per_day: u32) -> RawConfig {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut requirements = HashMap::new();
        for offset in 0..3 {
            requirements.insert((start + chrono::Duration::days(offset), "Day".to_string()), req_per_day);
        }

        RawConfig {
            start,
            end: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            work_shifts: vec![WorkShiftDef { name: "Day".into(), staffed_flag: true }],
            holiday_types: vec![HolidayTypeDef { name: "Off".into(), fixed_quota: false }],
            employment_types: vec![],
            global_max_consec: 5,
            forbidden_transitions: vec![],
            ng_pairs: vec![],
            staff: vec![
                RawStaff {
                    name: "Alice".into(),
                    employment_type: None,
                    able: HashMap::new(),
                    preference: HashMap::new(),
                    max_consec_work: 0,
                    prev_consec_work: 0,
                    prev_shift_type: None,
                    holiday_quota: HashMap::new(),
                },
                RawStaff {
                    name: "Bob".into(),
                    employment_type: None,
                    able: HashMap::new(),
                    preference: HashMap::new(),
                    max_consec_work: 0,
                    prev_consec_work: 0,
                    prev_shift_type: None,
                    holiday_quota: HashMap::new(),
                },
            ],
            requirements,
            hopes: HashMap::new(),
            weekday_rules: vec![],
            global_rules: vec![],
            public_holiday_rule: PublicHolidayRule::default(),
            holiday_order_rules: vec![],
            period_counts: HashMap::new(),
            vacancy_policy: VacancyPolicy::KeepBlank,
            solver_timeout_secs: 30,
        }
    }

    /// S1. Trivial feasibility (§8).
    #[test]
    fn test_s1_trivial_feasibility() {
        let cfg = two_staff_three_days(1);
        let outcome = solve(cfg, SolveOptions::default()).unwrap();
        match outcome {
            SolveOutcome::Solved { schedule, .. } => {
                let day_count = schedule
                    .cells
                    .iter()
                    .flatten()
                    .filter(|s| s.as_str() == "Day")
                    .count();
                assert_eq!(day_count, 3);
                for row in &schedule.cells {
                    assert_eq!(row.len(), 3);
                }
            }
            _ => panic!("expected a feasible schedule"),
        }
    }

    /// A hope pinning a staff member onto a shift they are not `able` for
    /// (F2, hard) conflicts with the hope itself (F4, softenable) — a
    /// minimal one-family infeasibility the diagnoser should name (§8's
    /// diagnosis property).
    #[test]
    fn test_hope_against_capability_is_diagnosed() {
        let mut cfg = two_staff_three_days(1);
        cfg.staff.truncate(1);
        cfg.staff[0].able.insert("Day".to_string(), false);
        cfg.hopes
            .insert(("Alice".to_string(), cfg.start), HopeToken::Concrete("Day".to_string()));

        let outcome = solve(cfg, SolveOptions::default()).unwrap();
        match outcome {
            SolveOutcome::Infeasible { causes } => {
                assert!(causes.iter().any(|c| c.family == "F4"));
            }
            _ => panic!("expected an infeasible diagnosis"),
        }
    }

    #[test]
    fn test_compute_signature_matches_direct_call() {
        let cfg = two_staff_three_days(1);
        assert_eq!(compute_signature(&cfg).as_hex(), signature::compute_signature(&cfg).as_hex());
    }
}
