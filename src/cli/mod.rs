//! CLI command implementations

pub mod analysis;
pub mod audit;
pub mod contrast;
pub mod history;
