pub mod commands;
pub mod generate;

pub use commands::{Cli, Commands};
