//! Minimal demonstration of the public [`scheduling_core::solve`] entry
//! point: a three-day, two-staff roster with a single required work shift.
//! Run with `cargo run --example solve_demo --features examples`.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use scheduling_core::config::raw::{HolidayTypeDef, PublicHolidayRule, RawStaff, VacancyPolicy, WorkShiftDef};
use scheduling_core::{solve, RawConfig, SolveOptions, SolveOutcome};

fn main() {
    scheduling_core::init_tracing();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut requirements = HashMap::new();
    for offset in 0..3 {
        requirements.insert((start + Duration::days(offset), "Day".to_string()), 1);
    }

    let config = RawConfig {
        start,
        end: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        work_shifts: vec![WorkShiftDef { name: "Day".into(), staffed_flag: true }],
        holiday_types: vec![HolidayTypeDef { name: "Off".into(), fixed_quota: false }],
        employment_types: vec![],
        global_max_consec: 5,
        forbidden_transitions: vec![],
        ng_pairs: vec![],
        staff: vec![
            RawStaff {
                name: "Alice".into(),
                employment_type: None,
                able: HashMap::new(),
                preference: HashMap::new(),
                max_consec_work: 0,
                prev_consec_work: 0,
                prev_shift_type: None,
                holiday_quota: HashMap::new(),
            },
            RawStaff {
                name: "Bob".into(),
                employment_type: None,
                able: HashMap::new(),
                preference: HashMap::new(),
                max_consec_work: 0,
                prev_consec_work: 0,
                prev_shift_type: None,
                holiday_quota: HashMap::new(),
            },
        ],
        requirements,
        hopes: HashMap::new(),
        weekday_rules: vec![],
        global_rules: vec![],
        public_holiday_rule: PublicHolidayRule::default(),
        holiday_order_rules: vec![],
        period_counts: HashMap::new(),
        vacancy_policy: VacancyPolicy::KeepBlank,
        solver_timeout_secs: 30,
    };

    let options = SolveOptions {
        progress: Some(Box::new(|p| {
            println!("progress: {:.0}%", p.fraction() * 100.0);
        })),
        ..Default::default()
    };

    match solve(config, options) {
        Ok(SolveOutcome::Solved { schedule, warnings }) => {
            for (name, row) in schedule.staff_names.iter().zip(&schedule.cells) {
                println!("{name}: {row:?}");
            }
            for warning in &warnings {
                println!("warning: {}", warning.message);
            }
        }
        Ok(SolveOutcome::Infeasible { causes }) => {
            for cause in causes {
                println!("infeasible: {}", cause.human_readable);
            }
        }
        Ok(SolveOutcome::Timeout) => println!("timed out"),
        Err(err) => eprintln!("error: {err}"),
    }
}
