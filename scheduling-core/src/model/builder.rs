//! `ModelBuilder` (§2, §4.3): orchestrates the decision-variable grid, every
//! constraint family, and the `ObjectiveComposer`, handing a ready-to-solve
//! [`Backend`] back to the [`SolverDriver`].
//!
//! [`SolverDriver`]: crate::solver::driver::SolverDriver

use tracing::debug;

use crate::config::NormalizedConfig;
use crate::solver::backend::Backend;

use super::families::*;
use super::objective::ObjectiveComposer;
use super::variables::VariableGrid;

pub struct ModelBuilder {
    backend: Backend,
    vars: VariableGrid,
}

impl ModelBuilder {
    pub fn new(cfg: &NormalizedConfig) -> Self {
        let mut backend = Backend::new();
        let vars = VariableGrid::build(cfg, &mut backend);
        Self { backend, vars }
    }

    pub fn vars(&self) -> &VariableGrid {
        &self.vars
    }

    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }

    /// Builds every hard family plus every soft family's objective
    /// contribution, sets the backend's maximization objective, and hands
    /// back the backend alongside the variable grid needed to read the
    /// solution back into a `Schedule` once solved.
    pub fn build(mut self, cfg: &NormalizedConfig) -> (Backend, VariableGrid) {
        let mut objective = ObjectiveComposer::new();

        debug!("model: adding hard families F1-F2, F4-F6, F8-F9, F13-F14");
        assignment::add_exactly_one(cfg, &self.vars, &mut self.backend);
        assignment::add_capability(cfg, &self.vars, &mut self.backend);
        hopes::add_hopes(cfg, &self.vars, &mut self.backend);
        weekday_rules::add_weekday_rules(cfg, &self.vars, &mut self.backend);
        global_rules::add_global_rules(cfg, &self.vars, &mut self.backend);
        transitions::add_forbidden_transitions(cfg, &self.vars, &mut self.backend);
        period_counts::add_period_counts(cfg, &self.vars, &mut self.backend);
        consecutive::add_consecutive_work(cfg, &self.vars, &mut self.backend);
        holiday_order::add_holiday_order(cfg, &self.vars, &mut self.backend);
        public_holiday::add_public_holiday_compensation(cfg, &self.vars, &mut self.backend);

        debug!("model: adding mixed hard/soft families F3, F7, F11-F12");
        assignment::add_requirement(cfg, &self.vars, &mut self.backend, &mut objective);
        ng_pairs::add_ng_pairs(cfg, &self.vars, &mut self.backend, &mut objective);
        holiday_quota::add_weekly_quota(cfg, &self.vars, &mut self.backend, &mut objective);
        holiday_quota::add_monthly_quota(cfg, &self.vars, &mut self.backend, &mut objective);

        debug!("model: adding objective-only families F15-F17");
        vacancy::add_vacancy_steering(cfg, &self.vars, &mut objective);
        preference::add_preference_nudges(cfg, &self.vars, &mut objective);
        preference::add_tie_breaker(cfg, &self.vars, &mut objective);

        self.backend.maximize(objective.terms());
        (self.backend, self.vars)
    }
}
