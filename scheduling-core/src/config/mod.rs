pub mod migration;
pub mod normalize;
pub mod raw;
pub mod settings;
pub mod shift_universe;

pub use normalize::{normalize, NormalizedConfig, StaffId};
pub use raw::RawConfig;
pub use settings::EngineSettings;
pub use shift_universe::{ShiftKind, ShiftTypeId, ShiftUniverse};
