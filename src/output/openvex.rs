use std::io::Write;

use super::handler::OutputHandler;
use crate::errors::VexError;
use crate::vex;

pub const AUTHOR: &str = "vextriage";
pub const AUTHOR_ROLE: &str = "AI";

/// Accumulates statements and writes a single OpenVEX document on close.
pub struct OpenvexHandler<W: Write> {
    w: W,
    stmts: Vec<vex::Statement>,
    closed: bool,
}

impl<W: Write> OpenvexHandler<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            stmts: Vec::new(),
            closed: false,
        }
    }
}

impl<W: Write> OutputHandler for OpenvexHandler<W> {
    fn handle_statements(&mut self, stmts: Vec<vex::Statement>) -> Result<(), VexError> {
        self.stmts.extend(stmts);
        Ok(())
    }

    fn close(&mut self) -> Result<(), VexError> {
        if self.closed {
            return Ok(());
        }
        let mut doc = vex::Document::new();
        doc.author = AUTHOR.to_string();
        doc.role = AUTHOR_ROLE.to_string();
        doc.statements = std::mem::take(&mut self.stmts);
        doc.generate_canonical_id()?;
        serde_json::to_writer_pretty(&mut self.w, &doc)?;
        self.w.write_all(b"\n")?;
        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}
