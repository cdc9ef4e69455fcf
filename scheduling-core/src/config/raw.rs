//! Raw, caller-facing input shape (§6 of the spec) — the immutable snapshot an
//! embedding editor hands to the engine for a single solve. Everything here is
//! string/name addressed; `ConfigNormalizer` resolves names to internal ids and
//! rejects or migrates legacy shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Preference {
    Low,
    Med,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleKind {
    Must,
    Forbid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NgKind {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum HopeToken {
    Concrete(String),
    AnyHoliday,
    AnyWork,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GlobalRuleScope {
    Weekday(Weekday),
    Date(NaiveDate),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VacancyScope {
    All,
    Employment(String),
    Staff(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VacancyPolicy {
    KeepBlank,
    AssignSpecific {
        candidates: Vec<String>,
        scope: VacancyScope,
    },
    /// Pre-migration free-form label kept only so `ConfigNormalizer` can map
    /// it onto one of the two canonical variants above; never seen post-normalization.
    Legacy {
        label: String,
        filler_shift_type: Option<String>,
        extra_candidates: Vec<String>,
        assist_shift: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkShiftDef {
    pub name: String,
    pub staffed_flag: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HolidayTypeDef {
    pub name: String,
    pub fixed_quota: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HolidayQuota {
    pub week_count: Option<u32>,
    pub month_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawStaff {
    pub name: String,
    pub employment_type: Option<String>,
    /// Absent entries default to `true` for every work shift (§4.2).
    pub able: HashMap<String, bool>,
    /// Absent entries default to `Med` (§4.2).
    pub preference: HashMap<String, Preference>,
    /// `0` means "use `globalMaxConsec`".
    pub max_consec_work: u32,
    pub prev_consec_work: u32,
    /// A name not present in the shift-type universe normalizes to `None`.
    pub prev_shift_type: Option<String>,
    /// Only meaningful for holidays with `fixedQuota = true`.
    pub holiday_quota: HashMap<String, HolidayQuota>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdayRule {
    pub staff: String,
    pub weekday: Weekday,
    pub token: HopeToken,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalRule {
    pub scope: GlobalRuleScope,
    pub holiday_type: String,
    pub employment_type_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PublicHolidayRule {
    pub enabled: bool,
    pub employment_types: Vec<String>,
    pub comp_holiday: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HolidayOrderRule {
    pub pre: String,
    pub post: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForbiddenTransition {
    pub prev: String,
    pub next: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NgPair {
    pub a: String,
    pub b: String,
    pub kind: NgKind,
}

/// The immutable input to a single solve (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub work_shifts: Vec<WorkShiftDef>,
    pub holiday_types: Vec<HolidayTypeDef>,
    pub employment_types: Vec<String>,
    pub global_max_consec: u32,
    pub forbidden_transitions: Vec<ForbiddenTransition>,
    pub ng_pairs: Vec<NgPair>,
    pub staff: Vec<RawStaff>,
    /// `(day, work-shift) -> required count`.
    pub requirements: HashMap<(NaiveDate, String), u32>,
    /// `(staff, day) -> token`.
    pub hopes: HashMap<(String, NaiveDate), HopeToken>,
    pub weekday_rules: Vec<WeekdayRule>,
    pub global_rules: Vec<GlobalRule>,
    pub public_holiday_rule: PublicHolidayRule,
    pub holiday_order_rules: Vec<HolidayOrderRule>,
    /// `(staff, shift-type) -> exact target count`.
    pub period_counts: HashMap<(String, String), u32>,
    pub vacancy_policy: VacancyPolicy,
    pub solver_timeout_secs: u64,
}

impl RawConfig {
    pub fn default_timeout() -> u64 {
        300
    }
}
