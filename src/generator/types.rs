use serde::{Deserialize, Serialize};

/// One vulnerability as fed to the engine. Uniquely identified by `vuln_id`
/// within one invocation; duplicates are not deduplicated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub vuln_id: String,
    pub pkg_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub severity: String,
}

/// Operator-supplied context folded verbatim into every batch's prompt.
#[derive(Debug, Clone, Default)]
pub struct Hints {
    pub descriptions: Vec<String>,
    pub container: bool,
    pub not_server: bool,
    pub used_commands: Vec<String>,
    pub unused_commands: Vec<String>,
    /// Focus on Confidentiality and Integrity rather than Availability.
    pub compromise_on_availability: bool,
}

/// The model's per-vulnerability exploitability judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub vuln_id: String,
    pub exploitable: bool,
    /// 0.0-1.0
    pub confidence: f64,
    pub reason: String,
}

/// Top-level shape of the model response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmOutput {
    pub result: Vec<Verdict>,
}
