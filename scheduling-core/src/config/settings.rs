//! `EngineSettings` — ambient, non-business tuning of the engine itself
//! (§9 "Engine settings"): default solver timeout, diagnoser timeout, worker
//! poll interval, objective scale. Distinct from the per-solve `RawConfig`
//! business payload, which is always supplied by the caller and never read
//! from the environment or disk by the core.
//!
//! Grounded on the teacher's `infrastructure::config::Settings` loader
//! (`config::Config::builder()` layering `config/default` + `config/{env}` +
//! `APP__`-prefixed env vars), generalized from the teacher's HTTP-server
//! settings shape to the handful of knobs the solving core itself needs.

// `::config` (leading `::`) forces resolution against the external crate
// rather than this module's own parent, `crate::config` — both are named
// `config`.
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Used when `RawConfig::solver_timeout_secs == 0` (§4.2 default fill-in).
    pub default_solver_timeout_secs: u64,
    /// The Diagnoser has its own timeout, independent of the main solve (§4.5).
    pub diagnoser_timeout_secs: u64,
    /// Cadence, in milliseconds, at which the driver's worker-thread poll
    /// loop checks for completion and updates `SolveProgress` (§4.4, §9
    /// "Thread + polling loop for progress").
    pub worker_poll_interval_millis: u64,
    /// Fixed-point scale applied to fractional objective weights before they
    /// are handed to the integer-domain backend (§4.3, `ObjectiveComposer`).
    pub objective_scale: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_solver_timeout_secs: 300,
            diagnoser_timeout_secs: 300,
            worker_poll_interval_millis: 100,
            objective_scale: 100,
        }
    }
}

impl EngineSettings {
    /// Loads `config/default.{toml,...}` layered with `config/{RUN_ENV}` and
    /// `APP__`-prefixed environment overrides, falling back to
    /// [`EngineSettings::default`] when no config sources are present —
    /// callers embedding the engine are not required to ship a config file.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_spec_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.default_solver_timeout_secs, 300);
        assert_eq!(settings.diagnoser_timeout_secs, 300);
        assert_eq!(settings.worker_poll_interval_millis, 100);
        assert_eq!(settings.objective_scale, 100);
    }
}
