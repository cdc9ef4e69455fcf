//! `ObjectiveComposer` (§4.3 families F3/F7-soft/F11-soft/F12/F15-F17):
//! accumulates weighted terms from every soft family into a single
//! maximization objective, fixed-point scaled for the integer-domain backend.

use crate::solver::backend::VarHandle;

/// Every literal weight in §4.3 (`10000`, `0.2`, `0.01`, …) is multiplied by
/// this constant and rounded before being added as an integer coefficient —
/// the backend only optimizes over integer linear expressions.
pub const OBJECTIVE_SCALE: i64 = 100;

/// Scales a literal spec weight (which may be fractional, e.g. `0.24`) into
/// the fixed-point integer domain.
pub fn scale(weight: f64) -> i64 {
    (weight * OBJECTIVE_SCALE as f64).round() as i64
}

#[derive(Default)]
pub struct ObjectiveComposer {
    terms: Vec<(VarHandle, i64)>,
}

impl ObjectiveComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scaled(&mut self, var: VarHandle, weight: f64) {
        let coeff = scale(weight);
        if coeff != 0 {
            self.terms.push((var, coeff));
        }
    }

    pub fn add_integer(&mut self, var: VarHandle, coeff: i64) {
        if coeff != 0 {
            self.terms.push((var, coeff));
        }
    }

    pub fn terms(&self) -> &[(VarHandle, i64)] {
        &self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds_fractional_weights() {
        assert_eq!(scale(0.24), 24);
        assert_eq!(scale(0.01), 1);
        assert_eq!(scale(10000.0), 1_000_000);
    }

    #[test]
    fn test_zero_weight_terms_are_dropped() {
        let mut c = ObjectiveComposer::new();
        c.add_scaled(VarHandle(0), 0.0);
        assert!(c.terms().is_empty());
    }
}
