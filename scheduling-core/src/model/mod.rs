pub mod builder;
pub mod families;
pub mod objective;
pub mod variables;

pub use builder::ModelBuilder;
pub use variables::VariableGrid;
