use crate::errors::VexError;
use crate::vex;

/// Accumulates or streams statements into an output format. Receives one
/// call per completed batch, from a single task.
pub trait OutputHandler {
    fn handle_statements(&mut self, stmts: Vec<vex::Statement>) -> Result<(), VexError>;
    fn close(&mut self) -> Result<(), VexError>;
}
