//! `SolverDriver` (§4.4): runs the backend on a worker thread, polls for
//! progress, and maps backend outcomes onto core-level statuses.
//!
//! Generalizes the teacher's `tokio::sync::mpsc`-based `JobProcessor::start`
//! (an async queue of jobs) down to "one CPU-bound solve, run on
//! `std::thread::spawn`, polled by the caller's thread" — §9 "Worker-thread
//! choice".

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::backend::{Backend, BackendOutcome, Solution2};

/// Shared, lock-free handle an embedder can poll to render a progress bar
/// without the core depending on any UI toolkit.
#[derive(Clone)]
pub struct SolveProgress {
    elapsed_millis: Arc<AtomicU64>,
    finished: Arc<AtomicBool>,
    timeout_secs: u64,
}

impl SolveProgress {
    fn new(timeout_secs: u64) -> Self {
        Self {
            elapsed_millis: Arc::new(AtomicU64::new(0)),
            finished: Arc::new(AtomicBool::new(false)),
            timeout_secs,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_millis.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    /// `min(1.0, elapsed / timeoutSeconds)`, per §4.4.
    pub fn fraction(&self) -> f64 {
        if self.timeout_secs == 0 {
            return 1.0;
        }
        (self.elapsed().as_secs_f64() / self.timeout_secs as f64).min(1.0)
    }
}

pub enum SolveStatus {
    Solved(Box<dyn Solution2>),
    Infeasible,
    Timeout,
    Internal(String),
}

pub struct SolverDriver {
    timeout: Duration,
    poll_interval: Duration,
}

impl SolverDriver {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_millis(100),
        }
    }

    /// As [`SolverDriver::new`], but with the worker poll cadence taken from
    /// `EngineSettings` rather than the spec's literal default (§9 "Engine
    /// settings").
    pub fn with_poll_interval(timeout_secs: u64, poll_interval: Duration) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            poll_interval,
        }
    }

    /// Runs `backend.solve_with_timeout` while updating `progress` on the
    /// driver's poll cadence (§4.4), invoking `on_tick` (if supplied) after
    /// every update so an embedder's `ProgressSink` gets a callback.
    pub fn solve(&self, backend: Backend, on_tick: Option<&dyn Fn(&SolveProgress)>) -> SolveStatus {
        let progress = SolveProgress::new(self.timeout.as_secs());
        info!(timeout_secs = self.timeout.as_secs(), "solver: starting");

        let outcome = backend.solve_with_timeout(self.timeout, self.poll_interval, |elapsed| {
            progress
                .elapsed_millis
                .store(elapsed.as_millis() as u64, Ordering::Relaxed);
            if let Some(tick) = on_tick {
                tick(&progress);
            }
        });
        progress.finished.store(true, Ordering::Relaxed);

        match outcome {
            BackendOutcome::Solved(solution) => {
                info!(elapsed_ms = progress.elapsed().as_millis(), "solver: solved");
                SolveStatus::Solved(solution)
            }
            BackendOutcome::Infeasible => {
                info!("solver: infeasible");
                SolveStatus::Infeasible
            }
            BackendOutcome::TimedOut => {
                warn!(timeout_secs = self.timeout.as_secs(), "solver: timed out");
                SolveStatus::Timeout
            }
            BackendOutcome::Internal(msg) => {
                warn!(error = %msg, "solver: internal backend error");
                SolveStatus::Internal(msg)
            }
        }
    }
}
