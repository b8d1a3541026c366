use std::io::Write;

use super::handler::OutputHandler;
use crate::errors::VexError;
use crate::vex;

/// Streams one annotated `.trivyignore` record per statement: the statement
/// JSON as a comment line, then the bare vulnerability identifier.
pub struct TrivyignoreHandler<W: Write> {
    w: W,
}

impl<W: Write> TrivyignoreHandler<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }
}

impl<W: Write> OutputHandler for TrivyignoreHandler<W> {
    fn handle_statements(&mut self, stmts: Vec<vex::Statement>) -> Result<(), VexError> {
        for stmt in stmts {
            let stmt_json = serde_json::to_string(&stmt)?;
            write!(self.w, "# {}\n{}\n\n", stmt_json, stmt.vulnerability.name)?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), VexError> {
        self.w.flush()?;
        Ok(())
    }
}
