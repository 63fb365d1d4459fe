pub mod config;
pub mod filters;
pub mod generator;
pub mod search;
pub mod slots;
pub mod state;
pub mod themes;
pub mod utils;

pub use config::*;
pub use generator::*;
pub use slots::*;

#[cfg(test)]
mod generator_tests;
