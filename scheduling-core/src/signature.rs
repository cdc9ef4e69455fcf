//! `InputSignature` (§4.7): a stable SHA-256 digest of a `RawConfig`, used by
//! callers to decide whether a previous `Schedule` is still valid.
//!
//! `serde_json` cannot serialize this crate's tuple-keyed `HashMap`s directly
//! (JSON object keys must be strings), so canonicalization is done by hand:
//! every collection is sorted into a stable order before being fed to the
//! hasher, rather than relying on `HashMap` iteration order.

use sha2::{Digest, Sha256};

use crate::config::raw::{
    GlobalRuleScope, HopeToken, NgKind, RawConfig, RuleKind, VacancyPolicy, VacancyScope, Weekday,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSignature(pub String);

impl InputSignature {
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

pub fn compute_signature(cfg: &RawConfig) -> InputSignature {
    let mut h = Sha256::new();

    h.update(cfg.start.to_string().as_bytes());
    h.update(cfg.end.to_string().as_bytes());

    let mut work_shifts: Vec<_> = cfg.work_shifts.iter().collect();
    work_shifts.sort_by(|a, b| a.name.cmp(&b.name));
    for w in work_shifts {
        h.update(w.name.as_bytes());
        h.update([w.staffed_flag as u8]);
    }

    let mut holiday_types: Vec<_> = cfg.holiday_types.iter().collect();
    holiday_types.sort_by(|a, b| a.name.cmp(&b.name));
    for ht in holiday_types {
        h.update(ht.name.as_bytes());
        h.update([ht.fixed_quota as u8]);
    }

    let mut employment_types: Vec<_> = cfg.employment_types.clone();
    employment_types.sort();
    for e in &employment_types {
        h.update(e.as_bytes());
    }

    h.update(cfg.global_max_consec.to_le_bytes());

    let mut transitions: Vec<_> = cfg.forbidden_transitions.iter().collect();
    transitions.sort_by(|a, b| (a.prev.as_str(), a.next.as_str()).cmp(&(b.prev.as_str(), b.next.as_str())));
    for t in transitions {
        h.update(t.prev.as_bytes());
        h.update(t.next.as_bytes());
    }

    let mut ng_pairs: Vec<_> = cfg.ng_pairs.iter().collect();
    ng_pairs.sort_by(|a, b| (a.a.as_str(), a.b.as_str()).cmp(&(b.a.as_str(), b.b.as_str())));
    for p in ng_pairs {
        h.update(p.a.as_bytes());
        h.update(p.b.as_bytes());
        h.update([ng_kind_tag(p.kind)]);
    }

    let mut staff: Vec<_> = cfg.staff.iter().collect();
    staff.sort_by(|a, b| a.name.cmp(&b.name));
    for s in staff {
        h.update(s.name.as_bytes());
        h.update(s.employment_type.as_deref().unwrap_or("").as_bytes());

        let mut able: Vec<_> = s.able.iter().collect();
        able.sort_by_key(|(k, _)| k.clone());
        for (k, v) in able {
            h.update(k.as_bytes());
            h.update([*v as u8]);
        }

        let mut pref: Vec<_> = s.preference.iter().collect();
        pref.sort_by_key(|(k, _)| k.clone());
        for (k, v) in pref {
            h.update(k.as_bytes());
            h.update([preference_tag(v)]);
        }

        h.update(s.max_consec_work.to_le_bytes());
        h.update(s.prev_consec_work.to_le_bytes());
        h.update(s.prev_shift_type.as_deref().unwrap_or("").as_bytes());

        let mut quota: Vec<_> = s.holiday_quota.iter().collect();
        quota.sort_by_key(|(k, _)| k.clone());
        for (k, q) in quota {
            h.update(k.as_bytes());
            h.update(q.week_count.unwrap_or(0).to_le_bytes());
            h.update(q.month_count.unwrap_or(0).to_le_bytes());
        }
    }

    let mut requirements: Vec<_> = cfg.requirements.iter().collect();
    requirements.sort_by_key(|((d, name), _)| (*d, name.clone()));
    for ((d, name), count) in requirements {
        h.update(d.to_string().as_bytes());
        h.update(name.as_bytes());
        h.update(count.to_le_bytes());
    }

    let mut hopes: Vec<_> = cfg.hopes.iter().collect();
    hopes.sort_by_key(|((name, d), _)| (name.clone(), *d));
    for ((name, d), token) in hopes {
        h.update(name.as_bytes());
        h.update(d.to_string().as_bytes());
        h.update(hope_token_bytes(token).as_bytes());
    }

    let mut weekday_rules: Vec<_> = cfg.weekday_rules.iter().collect();
    weekday_rules.sort_by_key(|r| (r.staff.clone(), weekday_tag(r.weekday)));
    for r in weekday_rules {
        h.update(r.staff.as_bytes());
        h.update([weekday_tag(r.weekday)]);
        h.update(hope_token_bytes(&r.token).as_bytes());
        h.update([rule_kind_tag(r.kind)]);
    }

    let mut global_rules: Vec<_> = cfg.global_rules.iter().collect();
    global_rules.sort_by_key(|r| r.holiday_type.clone());
    for r in global_rules {
        h.update(global_rule_scope_bytes(&r.scope).as_bytes());
        h.update(r.holiday_type.as_bytes());
        h.update(r.employment_type_filter.as_deref().unwrap_or("").as_bytes());
    }

    h.update([cfg.public_holiday_rule.enabled as u8]);
    let mut ph_emp = cfg.public_holiday_rule.employment_types.clone();
    ph_emp.sort();
    for e in &ph_emp {
        h.update(e.as_bytes());
    }
    h.update(cfg.public_holiday_rule.comp_holiday.as_deref().unwrap_or("").as_bytes());

    let mut order_rules: Vec<_> = cfg.holiday_order_rules.iter().collect();
    order_rules.sort_by(|a, b| (a.pre.as_str(), a.post.as_str()).cmp(&(b.pre.as_str(), b.post.as_str())));
    for r in order_rules {
        h.update(r.pre.as_bytes());
        h.update(r.post.as_bytes());
    }

    let mut period_counts: Vec<_> = cfg.period_counts.iter().collect();
    period_counts.sort_by_key(|((staff, shift), _)| (staff.clone(), shift.clone()));
    for ((staff, shift), count) in period_counts {
        h.update(staff.as_bytes());
        h.update(shift.as_bytes());
        h.update(count.to_le_bytes());
    }

    h.update(vacancy_policy_bytes(&cfg.vacancy_policy).as_bytes());
    h.update(cfg.solver_timeout_secs.to_le_bytes());

    InputSignature(format!("{:x}", h.finalize()))
}

fn preference_tag(p: &crate::config::raw::Preference) -> u8 {
    use crate::config::raw::Preference::*;
    match p {
        Low => 0,
        Med => 1,
        High => 2,
    }
}

fn rule_kind_tag(k: RuleKind) -> u8 {
    matches!(k, RuleKind::Forbid) as u8
}

fn ng_kind_tag(k: NgKind) -> u8 {
    matches!(k, NgKind::Soft) as u8
}

fn weekday_tag(w: Weekday) -> u8 {
    match w {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
        Weekday::All => 7,
    }
}

fn hope_token_bytes(t: &HopeToken) -> String {
    match t {
        HopeToken::Concrete(name) => format!("concrete:{name}"),
        HopeToken::AnyHoliday => "any-holiday".to_string(),
        HopeToken::AnyWork => "any-work".to_string(),
    }
}

fn global_rule_scope_bytes(s: &GlobalRuleScope) -> String {
    match s {
        GlobalRuleScope::Weekday(w) => format!("weekday:{}", weekday_tag(*w)),
        GlobalRuleScope::Date(d) => format!("date:{d}"),
    }
}

fn vacancy_policy_bytes(p: &VacancyPolicy) -> String {
    match p {
        VacancyPolicy::KeepBlank => "keep-blank".to_string(),
        VacancyPolicy::AssignSpecific { candidates, scope } => {
            format!("assign-specific:{}:{}", candidates.join(","), vacancy_scope_bytes(scope))
        }
        VacancyPolicy::Legacy { label, .. } => format!("legacy:{label}"),
    }
}

fn vacancy_scope_bytes(s: &VacancyScope) -> String {
    match s {
        VacancyScope::All => "all".to_string(),
        VacancyScope::Employment(e) => format!("employment:{e}"),
        VacancyScope::Staff(s) => format!("staff:{s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::raw::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn minimal() -> RawConfig {
        RawConfig {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            work_shifts: vec![],
            holiday_types: vec![],
            employment_types: vec![],
            global_max_consec: 5,
            forbidden_transitions: vec![],
            ng_pairs: vec![],
            staff: vec![],
            requirements: HashMap::new(),
            hopes: HashMap::new(),
            weekday_rules: vec![],
            global_rules: vec![],
            public_holiday_rule: PublicHolidayRule::default(),
            holiday_order_rules: vec![],
            period_counts: HashMap::new(),
            vacancy_policy: VacancyPolicy::KeepBlank,
            solver_timeout_secs: 300,
        }
    }

    #[test]
    fn test_signature_is_idempotent() {
        let cfg = minimal();
        assert_eq!(compute_signature(&cfg).as_hex(), compute_signature(&cfg).as_hex());
    }

    #[test]
    fn test_signature_insensitive_to_map_insertion_order() {
        let mut a = minimal();
        let mut b = minimal();
        a.requirements.insert((a.start, "Day".to_string()), 1);
        a.requirements.insert((a.end, "Night".to_string()), 2);
        b.requirements.insert((b.end, "Night".to_string()), 2);
        b.requirements.insert((b.start, "Day".to_string()), 1);
        assert_eq!(compute_signature(&a).as_hex(), compute_signature(&b).as_hex());
    }

    #[test]
    fn test_signature_changes_with_content() {
        let a = minimal();
        let mut b = minimal();
        b.global_max_consec = 6;
        assert_ne!(compute_signature(&a).as_hex(), compute_signature(&b).as_hex());
    }
}
