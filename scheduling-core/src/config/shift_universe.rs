//! The shift-type universe: `WorkShifts`, `HolidayTypes` and the synthetic
//! `{Vacant}` singleton, pairwise disjoint (Invariant 1, §3), assembled once by
//! `ConfigNormalizer` and shared read-only by every downstream component.

use std::collections::HashMap;

pub type ShiftTypeId = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    Work,
    Holiday,
    Vacant,
}

#[derive(Debug, Clone)]
pub struct ShiftTypeInfo {
    pub id: ShiftTypeId,
    pub name: String,
    pub kind: ShiftKind,
    /// Only meaningful for `Work`: participates in `req[d,w]` accounting.
    pub staffed: bool,
    /// Only meaningful for `Holiday`: has a per-staff quota configured.
    pub fixed_quota: bool,
}

#[derive(Debug, Clone)]
pub struct ShiftUniverse {
    infos: Vec<ShiftTypeInfo>,
    by_name: HashMap<String, ShiftTypeId>,
    vacant_id: Option<ShiftTypeId>,
}

impl ShiftUniverse {
    pub fn builder() -> ShiftUniverseBuilder {
        ShiftUniverseBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<ShiftTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn info(&self, id: ShiftTypeId) -> &ShiftTypeInfo {
        &self.infos[id as usize]
    }

    pub fn name_of(&self, id: ShiftTypeId) -> &str {
        &self.infos[id as usize].name
    }

    pub fn all_ids(&self) -> impl Iterator<Item = ShiftTypeId> + '_ {
        (0..self.infos.len() as ShiftTypeId).collect::<Vec<_>>().into_iter()
    }

    pub fn work_ids(&self) -> impl Iterator<Item = ShiftTypeId> + '_ {
        self.infos
            .iter()
            .filter(|i| i.kind == ShiftKind::Work)
            .map(|i| i.id)
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn staffed_work_ids(&self) -> impl Iterator<Item = ShiftTypeId> + '_ {
        self.infos
            .iter()
            .filter(|i| i.kind == ShiftKind::Work && i.staffed)
            .map(|i| i.id)
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn holiday_ids(&self) -> impl Iterator<Item = ShiftTypeId> + '_ {
        self.infos
            .iter()
            .filter(|i| i.kind == ShiftKind::Holiday)
            .map(|i| i.id)
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn fixed_quota_holiday_ids(&self) -> impl Iterator<Item = ShiftTypeId> + '_ {
        self.infos
            .iter()
            .filter(|i| i.kind == ShiftKind::Holiday && i.fixed_quota)
            .map(|i| i.id)
            .collect::<Vec<_>>()
            .into_iter()
    }

    pub fn vacant_id(&self) -> Option<ShiftTypeId> {
        self.vacant_id
    }
}

#[derive(Default)]
pub struct ShiftUniverseBuilder {
    infos: Vec<ShiftTypeInfo>,
    by_name: HashMap<String, ShiftTypeId>,
    vacant_id: Option<ShiftTypeId>,
}

impl ShiftUniverseBuilder {
    fn push(&mut self, name: String, kind: ShiftKind, staffed: bool, fixed_quota: bool) -> ShiftTypeId {
        let id = self.infos.len() as ShiftTypeId;
        self.by_name.insert(name.clone(), id);
        self.infos.push(ShiftTypeInfo {
            id,
            name,
            kind,
            staffed,
            fixed_quota,
        });
        id
    }

    pub fn add_work(&mut self, name: impl Into<String>, staffed: bool) -> ShiftTypeId {
        self.push(name.into(), ShiftKind::Work, staffed, false)
    }

    pub fn add_holiday(&mut self, name: impl Into<String>, fixed_quota: bool) -> ShiftTypeId {
        self.push(name.into(), ShiftKind::Holiday, false, fixed_quota)
    }

    pub fn add_vacant(&mut self, name: impl Into<String>) -> ShiftTypeId {
        let id = self.push(name.into(), ShiftKind::Vacant, false, false);
        self.vacant_id = Some(id);
        id
    }

    pub fn build(self) -> ShiftUniverse {
        ShiftUniverse {
            infos: self.infos,
            by_name: self.by_name,
            vacant_id: self.vacant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_kinds() {
        let mut b = ShiftUniverse::builder();
        let w = b.add_work("Day", true);
        let h = b.add_holiday("Weekly", true);
        let v = b.add_vacant("Vacant");
        let u = b.build();

        assert_eq!(u.info(w).kind, ShiftKind::Work);
        assert_eq!(u.info(h).kind, ShiftKind::Holiday);
        assert_eq!(u.info(v).kind, ShiftKind::Vacant);
        assert_eq!(u.vacant_id(), Some(v));
        assert_eq!(u.work_ids().collect::<Vec<_>>(), vec![w]);
        assert_eq!(u.holiday_ids().collect::<Vec<_>>(), vec![h]);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut b = ShiftUniverse::builder();
        b.add_work("Day", true);
        let u = b.build();
        assert_eq!(u.id_of("Day"), Some(0));
        assert_eq!(u.id_of("Nope"), None);
    }
}
