//! CLI command implementations

pub mod probe;
pub mod run;

pub use probe::probe;
pub use run::run;
