//! The decision-variable grid `x[s,d,t]` (§4.3): one boolean per
//! `(staff, day, shift type)` triple, materialized once by [`ModelBuilder`]
//! and shared read-only by every constraint family.
//!
//! [`ModelBuilder`]: super::builder::ModelBuilder

use crate::config::{NormalizedConfig, ShiftTypeId};
use crate::solver::backend::{Backend, VarHandle};

pub struct VariableGrid {
    staff_count: usize,
    day_count: usize,
    type_count: usize,
    vars: Vec<VarHandle>,
}

impl VariableGrid {
    pub fn build(cfg: &NormalizedConfig, backend: &mut Backend) -> Self {
        let staff_count = cfg.staff.len();
        let day_count = cfg.calendar.days.len();
        let type_count = cfg.universe.len();
        let mut vars = Vec::with_capacity(staff_count * day_count * type_count);
        for _ in 0..(staff_count * day_count * type_count) {
            vars.push(backend.new_binary());
        }
        Self {
            staff_count,
            day_count,
            type_count,
            vars,
        }
    }

    fn index(&self, s: usize, d: usize, t: ShiftTypeId) -> usize {
        debug_assert!(s < self.staff_count && d < self.day_count);
        (s * self.day_count + d) * self.type_count + t as usize
    }

    pub fn x(&self, s: usize, d: usize, t: ShiftTypeId) -> VarHandle {
        self.vars[self.index(s, d, t)]
    }

    /// All type-variables for a single `(staff, day)` cell.
    pub fn cell(&self, s: usize, d: usize) -> impl Iterator<Item = VarHandle> + '_ {
        (0..self.type_count).map(move |t| self.x(s, d, t as ShiftTypeId))
    }

    pub fn staff_count(&self) -> usize {
        self.staff_count
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }
}
