//! Subcommand implementations

pub mod distance;
pub mod nearest;
pub mod rank;
pub mod recommend;
pub mod suppliers;
