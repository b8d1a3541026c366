//! Turns raw model output into VEX statements.

use std::collections::HashMap;

use super::types::{LlmOutput, Verdict, Vulnerability};
use crate::errors::VexError;
use crate::vex;

/// Deserializes the whole buffered output. A parse failure is final for the
/// batch; retrying will not fix a structurally wrong response, so the raw
/// text is embedded for diagnosis instead.
pub fn parse_verdicts(raw: &str) -> Result<Vec<Verdict>, VexError> {
    let out: LlmOutput = serde_json::from_str(raw).map_err(|e| VexError::MalformedOutput {
        message: e.to_string(),
        raw: raw.to_string(),
    })?;
    Ok(out.result)
}

/// Builds one `not_affected` statement per non-exploitable verdict.
///
/// Exploitable verdicts are dropped. Verdicts for identifiers the model
/// invented (absent from `batch`) pass through with an empty description and
/// product id.
pub fn verdicts_to_statements(
    verdicts: &[Verdict],
    batch: &HashMap<String, Vulnerability>,
) -> Result<Vec<vex::Statement>, VexError> {
    let mut stmts = Vec::new();
    for v in verdicts {
        if v.exploitable {
            continue;
        }
        let source = batch.get(&v.vuln_id);
        let description = source
            .map(|s| {
                if s.description.is_empty() {
                    s.title.clone()
                } else {
                    s.description.clone()
                }
            })
            .unwrap_or_default();
        let pkg_id = source.map(|s| s.pkg_id.clone()).unwrap_or_default();
        stmts.push(vex::Statement {
            vulnerability: vex::Vulnerability {
                name: v.vuln_id.clone(),
                description,
            },
            products: vec![vex::Product { id: pkg_id }],
            status: vex::Status::NotAffected,
            justification: Some(vex::Justification::VulnerableCodeNotInExecutePath),
            impact_statement: serde_json::to_string(v)?,
        });
    }
    Ok(stmts)
}
