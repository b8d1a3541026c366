//! Turns a vulnerability scan report into VEX statements by asking an LLM
//! which findings are negligible in the given context.

pub mod cli;
pub mod errors;
pub mod generator;
pub mod llm;
pub mod output;
pub mod report;
pub mod vex;

pub use errors::VexError;
