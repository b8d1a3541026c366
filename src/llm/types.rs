use serde_json::Value;

/// Generation options forwarded to the backend.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Only forwarded when > 0.0; otherwise the backend default applies.
    pub temperature: f64,
    /// Deterministic sampling seed. Only forwarded when non-zero.
    pub seed: i64,
    /// When set, the backend is asked for schema-constrained output.
    /// Backends without native support fold the schema into the prompt.
    pub json_schema: Option<Value>,
}
