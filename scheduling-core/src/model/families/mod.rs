pub mod assignment;
pub mod consecutive;
pub mod global_rules;
pub mod holiday_order;
pub mod holiday_quota;
pub mod hopes;
pub mod ng_pairs;
pub mod period_counts;
pub mod preference;
pub mod public_holiday;
pub mod transitions;
pub mod vacancy;
pub mod weekday_rules;
