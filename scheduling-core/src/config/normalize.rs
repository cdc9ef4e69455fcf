//! `ConfigNormalizer` (§4.2): validates the raw `Config`, migrates legacy field
//! shapes, derives the shift-type universe, and resolves every name in the
//! raw input into an internal id, dropping unresolvable names with a warning
//! rather than failing the whole solve.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::{EngineError, EngineResult};

use crate::calendar::{build_calendar, Calendar};
use crate::schedule::Warning;

use super::migration::migrate_vacancy_policy;
use super::raw::{
    self, GlobalRuleScope, HopeToken, NgKind, RawConfig, RuleKind, Weekday as RawWeekday,
};
use super::shift_universe::{ShiftTypeId, ShiftUniverse};

pub type StaffId = usize;

pub use raw::Preference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopeTokenN {
    Concrete(ShiftTypeId),
    AnyHoliday,
    AnyWork,
}

#[derive(Debug, Clone)]
pub struct StaffN {
    pub name: String,
    pub employment_type: Option<String>,
    pub able_shifts: HashSet<ShiftTypeId>,
    pub preference: HashMap<ShiftTypeId, Preference>,
    pub max_consec_work: u32,
    pub prev_consec_work: u32,
    pub prev_shift_type: Option<ShiftTypeId>,
    pub weekly_quota: HashMap<ShiftTypeId, u32>,
    pub monthly_quota: HashMap<ShiftTypeId, u32>,
}

#[derive(Debug, Clone)]
pub struct WeekdayRuleN {
    pub staff: StaffId,
    /// `None` means `Weekday::All`.
    pub weekday: Option<u8>,
    pub token: HopeTokenN,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalRuleScopeN {
    Weekday(u8),
    Date(usize),
}

#[derive(Debug, Clone)]
pub struct GlobalRuleN {
    pub scope: GlobalRuleScopeN,
    pub holiday: ShiftTypeId,
    pub employment_type_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PublicHolidayRuleN {
    pub employment_types: HashSet<String>,
    pub comp_holiday: ShiftTypeId,
}

#[derive(Debug, Clone, Copy)]
pub struct HolidayOrderRuleN {
    pub pre: ShiftTypeId,
    pub post: ShiftTypeId,
}

#[derive(Debug, Clone, Copy)]
pub struct ForbiddenTransitionN {
    pub prev: ShiftTypeId,
    pub next: ShiftTypeId,
}

#[derive(Debug, Clone, Copy)]
pub struct NgPairN {
    pub a: StaffId,
    pub b: StaffId,
    pub kind: NgKind,
}

#[derive(Debug, Clone)]
pub enum VacancyScopeN {
    All,
    Employment(String),
    Staff(StaffId),
}

#[derive(Debug, Clone)]
pub enum VacancyPolicyN {
    KeepBlank,
    AssignSpecific {
        candidates: Vec<ShiftTypeId>,
        scope: VacancyScopeN,
    },
}

/// The normalized, immutable configuration consumed by `ModelBuilder`.
pub struct NormalizedConfig {
    pub calendar: Calendar,
    pub universe: ShiftUniverse,
    pub employment_types: Vec<String>,
    pub global_max_consec: u32,
    pub forbidden_transitions: Vec<ForbiddenTransitionN>,
    pub ng_pairs: Vec<NgPairN>,
    pub staff: Vec<StaffN>,
    pub staff_index: HashMap<String, StaffId>,
    /// `(day index, staffed work-shift id) -> required count`.
    pub requirements: HashMap<(usize, ShiftTypeId), u32>,
    /// `(staff id, day index) -> token`.
    pub hopes: HashMap<(StaffId, usize), HopeTokenN>,
    pub weekday_rules: Vec<WeekdayRuleN>,
    pub global_rules: Vec<GlobalRuleN>,
    pub public_holiday_rule: Option<PublicHolidayRuleN>,
    pub holiday_order_rules: Vec<HolidayOrderRuleN>,
    /// `(staff id, shift-type id) -> exact target count`.
    pub period_counts: HashMap<(StaffId, ShiftTypeId), u32>,
    pub vacancy_policy: VacancyPolicyN,
    pub solver_timeout_secs: u64,
}

pub fn normalize(
    raw: RawConfig,
    is_public_holiday: impl Fn(NaiveDate) -> bool,
) -> EngineResult<(NormalizedConfig, Vec<Warning>)> {
    let mut warnings = Vec::new();

    let calendar = build_calendar(raw.start, raw.end, is_public_holiday)?;
    if raw.staff.is_empty() {
        return Err(EngineError::InvalidRange(
            "no staff supplied for the solve".to_string(),
        ));
    }

    let universe = build_universe(&raw);

    let staff_index: HashMap<String, StaffId> = raw
        .staff
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.clone(), i))
        .collect();

    let staff = raw
        .staff
        .iter()
        .map(|s| normalize_staff(s, &universe, &mut warnings))
        .collect::<Vec<_>>();

    let forbidden_transitions = raw
        .forbidden_transitions
        .iter()
        .filter_map(|t| {
            match (universe.id_of(&t.prev), universe.id_of(&t.next)) {
                (Some(prev), Some(next)) => Some(ForbiddenTransitionN { prev, next }),
                _ => {
                    warnings.push(Warning::unknown_token(format!(
                        "forbidden transition references unknown shift type(s): {} -> {}",
                        t.prev, t.next
                    )));
                    None
                }
            }
        })
        .collect();

    let ng_pairs = raw
        .ng_pairs
        .iter()
        .filter_map(|p| {
            match (staff_index.get(&p.a), staff_index.get(&p.b)) {
                (Some(&a), Some(&b)) => Some(NgPairN { a, b, kind: p.kind }),
                _ => {
                    warnings.push(Warning::unknown_token(format!(
                        "NG pair references unknown staff: {} / {}",
                        p.a, p.b
                    )));
                    None
                }
            }
        })
        .collect();

    let mut requirements = HashMap::new();
    for ((date, shift_name), count) in &raw.requirements {
        let Some(day_idx) = calendar.index_of(*date) else {
            continue;
        };
        match universe.id_of(shift_name) {
            Some(id) if universe.staffed_work_ids().any(|w| w == id) => {
                requirements.insert((day_idx, id), *count);
            }
            _ => warnings.push(Warning::unknown_token(format!(
                "requirement references non-staffed or unknown work shift {shift_name} on {date}"
            ))),
        }
    }

    let mut hopes = HashMap::new();
    for ((staff_name, date), token) in &raw.hopes {
        let (Some(&staff_id), Some(day_idx)) =
            (staff_index.get(staff_name), calendar.index_of(*date))
        else {
            warnings.push(Warning::unknown_token(format!(
                "hope entry references unknown staff/day: {staff_name} / {date}"
            )));
            continue;
        };
        match resolve_token(token, &universe) {
            Some(t) => {
                hopes.insert((staff_id, day_idx), t);
            }
            None => warnings.push(Warning::unknown_token(format!(
                "hope entry for {staff_name} on {date} references an unknown shift type"
            ))),
        }
    }

    let weekday_rules = raw
        .weekday_rules
        .iter()
        .filter_map(|r| {
            let &staff_id = staff_index.get(&r.staff)?;
            let token = resolve_token(&r.token, &universe)?;
            Some(WeekdayRuleN {
                staff: staff_id,
                weekday: resolve_weekday(r.weekday),
                token,
                kind: r.kind,
            })
        })
        .collect();

    let global_rules = raw
        .global_rules
        .iter()
        .filter_map(|r| {
            let holiday = universe.id_of(&r.holiday_type)?;
            let scope = match &r.scope {
                GlobalRuleScope::Weekday(w) => GlobalRuleScopeN::Weekday(resolve_weekday(*w)?),
                GlobalRuleScope::Date(d) => GlobalRuleScopeN::Date(calendar.index_of(*d)?),
            };
            Some(GlobalRuleN {
                scope,
                holiday,
                employment_type_filter: r.employment_type_filter.clone(),
            })
        })
        .collect();

    let public_holiday_rule = if raw.public_holiday_rule.enabled {
        raw.public_holiday_rule
            .comp_holiday
            .as_ref()
            .and_then(|name| universe.id_of(name))
            .map(|comp_holiday| PublicHolidayRuleN {
                employment_types: raw.public_holiday_rule.employment_types.iter().cloned().collect(),
                comp_holiday,
            })
    } else {
        None
    };

    let holiday_order_rules = raw
        .holiday_order_rules
        .iter()
        .filter_map(|r| {
            match (universe.id_of(&r.pre), universe.id_of(&r.post)) {
                (Some(pre), Some(post)) => Some(HolidayOrderRuleN { pre, post }),
                _ => {
                    warnings.push(Warning::unknown_token(format!(
                        "holiday order rule references unknown shift type(s): {} -> {}",
                        r.pre, r.post
                    )));
                    None
                }
            }
        })
        .collect();

    let mut period_counts = HashMap::new();
    for ((staff_name, shift_name), count) in &raw.period_counts {
        match (staff_index.get(staff_name), universe.id_of(shift_name)) {
            (Some(&staff_id), Some(shift_id)) => {
                period_counts.insert((staff_id, shift_id), *count);
            }
            _ => warnings.push(Warning::unknown_token(format!(
                "period count references unknown staff/shift: {staff_name} / {shift_name}"
            ))),
        }
    }

    let vacancy_policy = resolve_vacancy_policy(
        migrate_vacancy_policy(raw.vacancy_policy.clone()),
        &universe,
        &staff_index,
        &mut warnings,
    );

    let solver_timeout_secs = if raw.solver_timeout_secs == 0 {
        RawConfig::default_timeout()
    } else {
        raw.solver_timeout_secs
    };

    let normalized = NormalizedConfig {
        calendar,
        universe,
        employment_types: raw.employment_types.clone(),
        global_max_consec: raw.global_max_consec,
        forbidden_transitions,
        ng_pairs,
        staff,
        staff_index,
        requirements,
        hopes,
        weekday_rules,
        global_rules,
        public_holiday_rule,
        holiday_order_rules,
        period_counts,
        vacancy_policy,
        solver_timeout_secs,
    };

    Ok((normalized, warnings))
}

fn build_universe(raw: &RawConfig) -> ShiftUniverse {
    let mut builder = ShiftUniverse::builder();
    for w in &raw.work_shifts {
        builder.add_work(w.name.clone(), w.staffed_flag);
    }
    for h in &raw.holiday_types {
        builder.add_holiday(h.name.clone(), h.fixed_quota);
    }
    if raw.vacancy_admits_vacant() {
        builder.add_vacant("Vacant");
    }
    builder.build()
}

fn resolve_token(token: &HopeToken, universe: &ShiftUniverse) -> Option<HopeTokenN> {
    match token {
        HopeToken::AnyHoliday => Some(HopeTokenN::AnyHoliday),
        HopeToken::AnyWork => Some(HopeTokenN::AnyWork),
        HopeToken::Concrete(name) => universe.id_of(name).map(HopeTokenN::Concrete),
    }
}

fn resolve_weekday(w: RawWeekday) -> Option<u8> {
    match w {
        RawWeekday::Mon => Some(0),
        RawWeekday::Tue => Some(1),
        RawWeekday::Wed => Some(2),
        RawWeekday::Thu => Some(3),
        RawWeekday::Fri => Some(4),
        RawWeekday::Sat => Some(5),
        RawWeekday::Sun => Some(6),
        RawWeekday::All => None,
    }
}

fn resolve_vacancy_policy(
    policy: raw::VacancyPolicy,
    universe: &ShiftUniverse,
    staff_index: &HashMap<String, StaffId>,
    warnings: &mut Vec<Warning>,
) -> VacancyPolicyN {
    match policy {
        raw::VacancyPolicy::KeepBlank => VacancyPolicyN::KeepBlank,
        raw::VacancyPolicy::AssignSpecific { candidates, scope } => {
            let candidates = candidates
                .iter()
                .filter_map(|name| {
                    let id = universe.id_of(name);
                    if id.is_none() {
                        warnings.push(Warning::unknown_token(format!(
                            "vacancy candidate references unknown shift type: {name}"
                        )));
                    }
                    id
                })
                .collect();
            let scope = match scope {
                raw::VacancyScope::All => VacancyScopeN::All,
                raw::VacancyScope::Employment(e) => VacancyScopeN::Employment(e),
                raw::VacancyScope::Staff(name) => match staff_index.get(&name) {
                    Some(&id) => VacancyScopeN::Staff(id),
                    None => {
                        warnings.push(Warning::unknown_token(format!(
                            "vacancy scope references unknown staff: {name}"
                        )));
                        VacancyScopeN::All
                    }
                },
            };
            VacancyPolicyN::AssignSpecific { candidates, scope }
        }
        raw::VacancyPolicy::Legacy { .. } => {
            // `migrate_vacancy_policy` always resolves `Legacy` away before this
            // function is called; unreachable in practice, default is the safe choice.
            VacancyPolicyN::KeepBlank
        }
    }
}

fn normalize_staff(s: &raw::RawStaff, universe: &ShiftUniverse, warnings: &mut Vec<Warning>) -> StaffN {
    let able_shifts = universe
        .work_ids()
        .filter(|&id| {
            let name = universe.name_of(id);
            *s.able.get(name).unwrap_or(&true)
        })
        .collect();

    let preference = universe
        .work_ids()
        .map(|id| {
            let name = universe.name_of(id);
            let pref = s.preference.get(name).cloned().unwrap_or(Preference::Med);
            (id, pref)
        })
        .collect();

    let prev_shift_type = s
        .prev_shift_type
        .as_ref()
        .and_then(|name| universe.id_of(name));
    if s.prev_shift_type.is_some() && prev_shift_type.is_none() {
        warnings.push(Warning::unknown_token(format!(
            "staff {} has unknown prevShiftType; treated as none",
            s.name
        )));
    }

    let mut weekly_quota = HashMap::new();
    let mut monthly_quota = HashMap::new();
    for (holiday_name, quota) in &s.holiday_quota {
        let Some(id) = universe.id_of(holiday_name) else {
            warnings.push(Warning::unknown_token(format!(
                "staff {} has a quota for unknown holiday {holiday_name}",
                s.name
            )));
            continue;
        };
        if !universe
            .fixed_quota_holiday_ids()
            .any(|h| h == id)
        {
            continue;
        }
        if let Some(w) = quota.week_count {
            weekly_quota.insert(id, w);
        }
        if let Some(m) = quota.month_count {
            monthly_quota.insert(id, m);
        }
    }

    StaffN {
        name: s.name.clone(),
        employment_type: s.employment_type.clone(),
        able_shifts,
        preference,
        max_consec_work: s.max_consec_work,
        prev_consec_work: s.prev_consec_work,
        prev_shift_type,
        weekly_quota,
        monthly_quota,
    }
}

impl RawConfig {
    /// `Vacant` is only admitted into the universe when some staff or the
    /// global policy could ever assign it (Invariant 5, §3): that is the case
    /// whenever the vacancy policy isn't resolved away entirely, which in
    /// practice means "always", since even `KeepBlank` assigns `Vacant`.
    fn vacancy_admits_vacant(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::raw::*;
    use std::collections::HashMap as Map;

    fn base_config() -> RawConfig {
        RawConfig {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            work_shifts: vec![WorkShiftDef {
                name: "Day".to_string(),
                staffed_flag: true,
            }],
            holiday_types: vec![HolidayTypeDef {
                name: "Off".to_string(),
                fixed_quota: false,
            }],
            employment_types: vec![],
            global_max_consec: 5,
            forbidden_transitions: vec![],
            ng_pairs: vec![],
            staff: vec![RawStaff {
                name: "Alice".to_string(),
                employment_type: None,
                able: Map::new(),
                preference: Map::new(),
                max_consec_work: 0,
                prev_consec_work: 0,
                prev_shift_type: None,
                holiday_quota: Map::new(),
            }],
            requirements: Map::new(),
            hopes: Map::new(),
            weekday_rules: vec![],
            global_rules: vec![],
            public_holiday_rule: PublicHolidayRule::default(),
            holiday_order_rules: vec![],
            period_counts: Map::new(),
            vacancy_policy: VacancyPolicy::KeepBlank,
            solver_timeout_secs: 0,
        }
    }

    #[test]
    fn test_empty_staff_list_rejected() {
        let mut cfg = base_config();
        cfg.staff.clear();
        assert!(normalize(cfg, |_| false).is_err());
    }

    #[test]
    fn test_default_timeout_applied() {
        let cfg = base_config();
        let (normalized, _) = normalize(cfg, |_| false).unwrap();
        assert_eq!(normalized.solver_timeout_secs, 300);
    }

    #[test]
    fn test_max_consec_falls_back_to_global() {
        let cfg = base_config();
        let (normalized, _) = normalize(cfg, |_| false).unwrap();
        // raw staff left max_consec_work at 0; the field itself is untouched by
        // normalize_staff (substitution happens in model building, §4.2), but
        // global_max_consec is carried through unchanged.
        assert_eq!(normalized.global_max_consec, 5);
        assert_eq!(normalized.staff[0].max_consec_work, 0);
    }

    #[test]
    fn test_able_defaults_true() {
        let cfg = base_config();
        let (normalized, _) = normalize(cfg, |_| false).unwrap();
        let day_id = normalized.universe.id_of("Day").unwrap();
        assert!(normalized.staff[0].able_shifts.contains(&day_id));
    }

    #[test]
    fn test_unknown_token_in_requirement_dropped_with_warning() {
        let mut cfg = base_config();
        cfg.requirements.insert(
            (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Ghost".to_string()),
            1,
        );
        let (normalized, warnings) = normalize(cfg, |_| false).unwrap();
        assert!(normalized.requirements.is_empty());
        assert!(warnings.iter().any(|w| w.kind == crate::schedule::WarningKind::UnknownToken));
    }
}
