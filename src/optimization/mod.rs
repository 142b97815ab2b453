// common helpers
pub mod algorithms;
pub mod report;
pub mod trace;
pub mod errors;
pub(crate) mod config;
pub(crate) mod signs;

// algorithms
pub mod newton;
pub mod bisection;
pub mod golden_section;

pub use config::DEFAULT_TOL;
