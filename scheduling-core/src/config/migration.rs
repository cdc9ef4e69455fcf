//! Legacy field migrations performed by `ConfigNormalizer` (§4.2, §6).
//!
//! Old free-form vacancy-policy labels map onto the two canonical variants;
//! the old `fillerShiftType` field seeds the `AssignSpecific` candidate list;
//! `extra_candidates`/`assist_shift` are merged in, uniquely, preserving first
//! occurrence; the old `temp_assign|extra_shift|assist` codes all collapse to
//! `AssignSpecific`.

use super::raw::{VacancyPolicy, VacancyScope};

/// Resolve a (possibly legacy) `VacancyPolicy` into its canonical shape.
pub fn migrate_vacancy_policy(policy: VacancyPolicy) -> VacancyPolicy {
    match policy {
        VacancyPolicy::KeepBlank => VacancyPolicy::KeepBlank,
        VacancyPolicy::AssignSpecific { candidates, scope } => {
            VacancyPolicy::AssignSpecific { candidates, scope }
        }
        VacancyPolicy::Legacy {
            label,
            filler_shift_type,
            extra_candidates,
            assist_shift,
        } => {
            let canonical_label = canonicalize_legacy_label(&label);
            if canonical_label == "keep_blank" {
                return VacancyPolicy::KeepBlank;
            }

            let mut candidates = Vec::new();
            let mut seen = std::collections::HashSet::new();
            let mut push_unique = |name: Option<String>, candidates: &mut Vec<String>| {
                if let Some(name) = name {
                    if seen.insert(name.clone()) {
                        candidates.push(name);
                    }
                }
            };

            push_unique(filler_shift_type, &mut candidates);
            for c in extra_candidates {
                push_unique(Some(c), &mut candidates);
            }
            push_unique(assist_shift, &mut candidates);

            VacancyPolicy::AssignSpecific {
                candidates,
                scope: VacancyScope::All,
            }
        }
    }
}

/// `temp_assign`, `extra_shift` and `assist` are old synonyms for the same
/// "assign a specific filler shift" behavior; everything else that isn't
/// recognized as "leave blank" also collapses to that behavior, since an
/// unrecognized label is closer in intent to "do something" than "do nothing".
fn canonicalize_legacy_label(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "keep_blank" | "blank" | "none" | "empty" => "keep_blank",
        _ => "assign_specific",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_blank_label_maps_to_keep_blank() {
        let policy = VacancyPolicy::Legacy {
            label: "BLANK".to_string(),
            filler_shift_type: None,
            extra_candidates: vec![],
            assist_shift: None,
        };
        assert_eq!(migrate_vacancy_policy(policy), VacancyPolicy::KeepBlank);
    }

    #[test]
    fn test_legacy_fields_merge_uniquely_preserving_order() {
        let policy = VacancyPolicy::Legacy {
            label: "temp_assign".to_string(),
            filler_shift_type: Some("Fill".to_string()),
            extra_candidates: vec!["Fill".to_string(), "Backup".to_string()],
            assist_shift: Some("Assist".to_string()),
        };
        match migrate_vacancy_policy(policy) {
            VacancyPolicy::AssignSpecific { candidates, scope } => {
                assert_eq!(candidates, vec!["Fill", "Backup", "Assist"]);
                assert_eq!(scope, VacancyScope::All);
            }
            other => panic!("expected AssignSpecific, got {other:?}"),
        }
    }
}
