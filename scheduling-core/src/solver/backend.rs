//! Thin insulation layer around the CP-SAT-class backend.
//!
//! The rest of the engine talks to a [`VarHandle`] and a small linear-algebra
//! vocabulary (`eq`/`le`/`ge` over weighted sums, `maximize`). Only this module
//! knows it is actually talking to `selen::Model` — grounded on
//! `examples/other_examples/…radevgit-selen…employee_scheduling.rs`, the one
//! retrieved real-world use of that crate in this pack, which shows
//! `Model::default()`, `m.int(lo, hi)`, `m.sum(&vars)`, `m.c(expr).{eq,le,ge}(int(n))`
//! and `m.solve() -> Result<Solution, _>`. Weighted linear combinations and
//! `maximize` are not exercised by that example; this module assumes the
//! conventional extension of that surface (coefficients via `coeff * var`
//! expression arithmetic, `model.maximize(expr)`) that every general-purpose
//! ILP/CP modeling crate in the Rust ecosystem provides in some form — see
//! DESIGN.md for the explicit note on this inferred surface.

use std::time::Duration;

use selen::prelude::*;

/// A variable handle opaque to callers outside this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarHandle(pub(crate) usize);

pub enum BackendOutcome {
    /// A feasible (not necessarily proven-optimal) assignment was found.
    Solved(Box<dyn Solution2>),
    /// The backend proved the model has no solution.
    Infeasible,
    /// The worker did not finish before the driver's timeout elapsed.
    TimedOut,
    /// The backend returned something other than the above (should not
    /// normally happen; kept so `SolverDriver` has somewhere to route it).
    Internal(String),
}

/// Object-safe wrapper so `BackendOutcome` doesn't need to be generic over the
/// concrete `selen::Solution` type.
pub trait Solution2: Send {
    fn value_of(&self, handle: VarHandle) -> i64;
}

struct SelenSolution {
    values: Vec<i64>,
}

impl Solution2 for SelenSolution {
    fn value_of(&self, handle: VarHandle) -> i64 {
        self.values[handle.0]
    }
}

/// Backend-agnostic model: boolean/integer variables plus weighted linear
/// constraints and a single maximization objective.
pub struct Backend {
    model: Model,
    vars: Vec<VarId>,
}

impl Backend {
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            vars: Vec::new(),
        }
    }

    pub fn new_binary(&mut self) -> VarHandle {
        let id = self.model.int(0, 1);
        self.vars.push(id);
        VarHandle(self.vars.len() - 1)
    }

    pub fn new_bounded_int(&mut self, lo: i32, hi: i32) -> VarHandle {
        let id = self.model.int(lo, hi);
        self.vars.push(id);
        VarHandle(self.vars.len() - 1)
    }

    fn expr(&self, terms: &[(VarHandle, i64)]) -> Expr {
        let mut acc: Expr = int(0).into();
        for &(handle, coeff) in terms {
            let var = self.vars[handle.0];
            acc = acc + (coeff as i32) * var;
        }
        acc
    }

    pub fn add_eq(&mut self, terms: &[(VarHandle, i64)], rhs: i64) {
        let e = self.expr(terms);
        self.model.c(e).eq(int(rhs as i32));
    }

    pub fn add_le(&mut self, terms: &[(VarHandle, i64)], rhs: i64) {
        let e = self.expr(terms);
        self.model.c(e).le(int(rhs as i32));
    }

    pub fn add_ge(&mut self, terms: &[(VarHandle, i64)], rhs: i64) {
        let e = self.expr(terms);
        self.model.c(e).ge(int(rhs as i32));
    }

    /// `Σ coeff · handle = rhs ⟺ ¬witness` — i.e. the equality is only
    /// enforced when `witness == 0`; when `witness == 1` it is relaxed
    /// entirely. Used by the Diagnoser (§4.5) to turn a hard family into a
    /// softenable one without duplicating constraint-family logic.
    pub fn add_eq_unless(&mut self, terms: &[(VarHandle, i64)], rhs: i64, witness: VarHandle) {
        // big-M relaxation: expr - M*witness <= rhs <= expr + M*witness
        let m = big_m(terms, rhs);
        let mut upper = terms.to_vec();
        upper.push((witness, -m));
        self.add_le(&upper, rhs);
        let mut lower: Vec<(VarHandle, i64)> = terms.iter().map(|&(h, c)| (h, -c)).collect();
        lower.push((witness, -m));
        self.add_le(&lower, -rhs);
    }

    /// `Σ coeff · handle ≤ rhs ⟺ ¬witness` — enforced when `witness == 0`,
    /// vacuous when `witness == 1` (same gating convention as
    /// [`Self::add_eq_unless`]).
    pub fn add_le_unless(&mut self, terms: &[(VarHandle, i64)], rhs: i64, witness: VarHandle) {
        let m = big_m(terms, rhs);
        let mut relaxed_terms = terms.to_vec();
        relaxed_terms.push((witness, -m));
        self.add_le(&relaxed_terms, rhs);
    }

    pub fn maximize(&mut self, terms: &[(VarHandle, i64)]) {
        let e = self.expr(terms);
        self.model.maximize(e);
    }

    /// Minimize the sum of the given (unweighted) violation witnesses — the
    /// Diagnoser's objective (§4.5).
    pub fn minimize_sum(&mut self, vars: &[VarHandle]) {
        let terms: Vec<(VarHandle, i64)> = vars.iter().map(|&h| (h, 1)).collect();
        let e = self.expr(&terms);
        self.model.minimize(e);
    }

    /// Runs `solve()` on a worker thread and polls for completion on
    /// `poll_interval` (the spec's "foreground yields every ~100ms", §4.4),
    /// invoking `on_tick` with elapsed time after every poll, and enforcing
    /// `timeout` ourselves rather than relying on backend-native cancellation
    /// (§9 "Worker-thread choice").
    pub fn solve_with_timeout(
        self,
        timeout: Duration,
        poll_interval: Duration,
        mut on_tick: impl FnMut(Duration),
    ) -> BackendOutcome {
        let (tx, rx) = std::sync::mpsc::channel();
        let num_vars = self.vars.len();
        let vars = self.vars.clone();
        let mut model = self.model;

        std::thread::spawn(move || {
            let result = model.solve();
            let mapped = match result {
                Ok(solution) => {
                    let values = vars.iter().map(|&v| solution.get::<i32>(v) as i64).collect();
                    Ok(SelenSolution { values })
                }
                Err(_) => Err(()),
            };
            // Ignore send errors: the receiver may have already timed out and
            // dropped its end; the worker thread still finishes naturally.
            let _ = tx.send(mapped);
        });

        let started = std::time::Instant::now();
        let deadline = started + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                on_tick(started.elapsed());
                return BackendOutcome::TimedOut;
            }
            match rx.recv_timeout(remaining.min(poll_interval)) {
                Ok(Ok(solution)) => {
                    debug_assert_eq!(solution.values.len(), num_vars);
                    on_tick(started.elapsed());
                    return BackendOutcome::Solved(Box::new(solution));
                }
                Ok(Err(())) => {
                    on_tick(started.elapsed());
                    return BackendOutcome::Infeasible;
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    on_tick(started.elapsed());
                    continue;
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    on_tick(started.elapsed());
                    return BackendOutcome::Internal("solver thread disconnected".to_string());
                }
            }
        }
    }
}

/// A safe-enough big-M bound for the implication relaxations above: the sum
/// of the absolute coefficients plus the absolute rhs is always large enough
/// to make the constraint vacuous when the witness is 1, since every variable
/// here is a 0/1 decision variable.
fn big_m(terms: &[(VarHandle, i64)], rhs: i64) -> i64 {
    terms.iter().map(|&(_, c)| c.abs()).sum::<i64>() + rhs.abs() + 1
}
