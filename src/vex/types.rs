//! OpenVEX v0.2.0 document subset.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CONTEXT: &str = "https://openvex.dev/ns/v0.2.0";
pub const PUBLIC_ID_PREFIX: &str = "https://openvex.dev/docs/public/vex";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@id", skip_serializing_if = "String::is_empty", default)]
    pub id: String,
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub role: String,
    pub timestamp: DateTime<Utc>,
    pub version: u64,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub vulnerability: Vulnerability,
    pub products: Vec<Product>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub justification: Option<Justification>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub impact_statement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "@id", skip_serializing_if = "String::is_empty", default)]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotAffected,
    Affected,
    Fixed,
    UnderInvestigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    ComponentNotPresent,
    VulnerableCodeNotPresent,
    VulnerableCodeNotInExecutePath,
    VulnerableCodeCannotBeControlledByAdversary,
    InlineMitigationsAlreadyExist,
}

impl Document {
    pub fn new() -> Self {
        Self {
            context: CONTEXT.to_string(),
            id: String::new(),
            author: String::new(),
            role: String::new(),
            timestamp: Utc::now(),
            version: 1,
            statements: Vec::new(),
        }
    }

    /// Derive the document `@id` from its content, so identical statement
    /// sets produce the same identifier.
    pub fn generate_canonical_id(&mut self) -> Result<&str, crate::errors::VexError> {
        if self.id.is_empty() {
            let canonical = serde_json::to_string(&self.statements)?;
            let mut hasher = DefaultHasher::new();
            canonical.hash(&mut hasher);
            self.version.hash(&mut hasher);
            self.id = format!("{}-{:016x}", PUBLIC_ID_PREFIX, hasher.finish());
        }
        Ok(&self.id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
