//! Prompt construction. Pure functions: identical inputs yield byte-identical
//! prompts.

use serde_json::{json, Value};

use super::types::{Hints, Vulnerability};
use crate::errors::VexError;

pub const OUTPUT_EXAMPLE: &str = r#"{"result": [
  {"vulnId": "CVE-2042-12345", "exploitable": false, "confidence": 0.4, "reason": "This vulnerability is negligible because this DDOS vulnerability is only exploitable in public server programs."},
  {"vulnId": "CVE-2043-23456", "exploitable": false, "confidence": 0.8, "reason": "This vulnerability is negligible because the vulnerable package \"foo\" is unlikely used."},
  {"vulnId": "CVE-2043-34567", "exploitable": true, "confidence": 0.9, "reason": "This vulnerability is exploitable because the affected command is explicitly marked as used."},
  {"vulnId": "CVE-2043-45678", "exploitable": false, "confidence": 1.0, "reason": "This vulnerability is negligible because the actual kernel version differs in the case of containers."}
]}"#;

/// JSON schema for the model response. Must stay in lock-step with
/// [`super::types::LlmOutput`]; drift surfaces as a parse error, not a type
/// mismatch.
pub fn output_schema() -> Value {
    // openai wants the top-level type to be Object, not Array, and its
    // strict structured-output mode rejects objects without an explicit
    // "additionalProperties": false
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "result": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "vulnId": {
                            "type": "string",
                            "description": "The **vulnerability ID** that corresponds to the vulnId in the input JSON.",
                        },
                        "exploitable": {
                            "type": "boolean",
                            "description": "Whether the vulnerability is **exploitable** in the given context.",
                        },
                        "confidence": {
                            "type": "number",
                            "description": "A float number (0.0-1.0). Higher value indicates higher **confidence** with the answer. Should not be 0.0.",
                        },
                        "reason": {
                            "type": "string",
                            "description": "The **reason** why you think the vulnerability is exploitable or negligible in this artifact. The reason string should be unique, descriptive, and in 2 or 3 sentences.",
                        },
                    },
                    "required": ["vulnId", "exploitable", "confidence", "reason"],
                },
            },
        },
        "required": ["result"],
    })
}

fn command_list(cmds: &[String]) -> String {
    format!("[{}]", cmds.join(", "))
}

/// Builds the system prompt: role statement, one bullet per active hint, then
/// the output contract (schema + worked example).
pub fn build_system_prompt(hints: &Hints) -> String {
    let mut p = String::from(
        "You are a security expert talented for triaging vulnerability reports.\n\
         You judge whether a vulnerability is likely negligible under the specified hints.\n\
         \n\
         ### Hints\n",
    );
    for d in &hints.descriptions {
        p.push_str("* ");
        p.push_str(d);
        p.push('\n');
    }
    if hints.container {
        p.push_str(
            "* The artifact is a container image. So, kernel-related vulnerabilities can be safely concluded as \"NOT exploitable\".\n",
        );
    }
    if hints.not_server {
        p.push_str(
            "* The artifact is not used as a network server program. So, server-specific vulnerabilities can be safely concluded as \"NOT exploitable\".\n",
        );
    }
    if !hints.used_commands.is_empty() {
        p.push_str(&format!(
            "* The following shell commands are known to be used: {}\n",
            command_list(&hints.used_commands)
        ));
    }
    if !hints.unused_commands.is_empty() {
        p.push_str(&format!(
            "* The following shell commands are known to be unused and their vulnerabilities can be safely concluded as \"NOT exploitable\", although these commands might be still present in the artifact: {}\n",
            command_list(&hints.unused_commands)
        ));
    }
    if hints.compromise_on_availability {
        p.push_str(
            "* Put solid focus on Confidentiality and Integrity rather than Availability. \
             e.g., denial-of-service does not need to be considered as catastrophic as data leakage and modification.\n",
        );
    }

    p.push_str(
        "\n### Input format\n\
         The input is similar to [Trivy](https://github.com/aquasecurity/trivy)'s JSON, but not exactly same.\n\
         \n\
         ### Output format\n\
         For each of the input vulnerabilities, print a JSON object that follows the specified JSON schema.\n\
         Only print a valid JSON object.\n",
    );
    p.push_str("#### Output format: JSON Schema\n");
    // Value maps serialize with sorted keys, so this stays byte-stable.
    p.push_str(&output_schema().to_string());
    p.push('\n');
    p.push_str("#### Output format: Example\n");
    p.push_str("```json\n");
    p.push_str(OUTPUT_EXAMPLE);
    p.push_str("\n```\n");
    p
}

/// Serializes the batch as the human turn. Hints never appear here.
pub fn build_human_prompt(batch: &[Vulnerability]) -> Result<String, VexError> {
    Ok(serde_json::to_string(batch)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hints() -> Hints {
        Hints {
            descriptions: vec!["Artifact name: \"python:3.12.4\"".into()],
            container: true,
            not_server: true,
            used_commands: vec!["python3".into()],
            unused_commands: vec!["git".into(), "wget".into()],
            compromise_on_availability: true,
        }
    }

    #[test]
    fn test_system_prompt_deterministic() {
        let hints = sample_hints();
        assert_eq!(build_system_prompt(&hints), build_system_prompt(&hints));
    }

    #[test]
    fn test_boolean_hints_toggle_single_bullet() {
        let hints = sample_hints();
        let full = build_system_prompt(&hints);

        let mut no_container = sample_hints();
        no_container.container = false;
        let without = build_system_prompt(&no_container);

        assert!(full.contains("kernel-related vulnerabilities"));
        assert!(!without.contains("kernel-related vulnerabilities"));
        // Exactly one bullet line of difference
        assert_eq!(
            full.lines().count(),
            without.lines().count() + 1,
        );
    }

    #[test]
    fn test_empty_command_lists_add_nothing() {
        let mut hints = sample_hints();
        hints.used_commands.clear();
        hints.unused_commands.clear();
        let p = build_system_prompt(&hints);
        assert!(!p.contains("known to be used"));
        assert!(!p.contains("known to be unused"));
    }

    #[test]
    fn test_command_lists_rendered() {
        let p = build_system_prompt(&sample_hints());
        assert!(p.contains("known to be used: [python3]"));
        assert!(p.contains("[git, wget]"));
    }

    #[test]
    fn test_schema_and_example_present() {
        let p = build_system_prompt(&Hints::default());
        assert!(p.contains("#### Output format: JSON Schema"));
        assert!(p.contains("\"vulnId\""));
        assert!(p.contains("CVE-2042-12345"));
        // The example block must itself be valid JSON
        let _: serde_json::Value = serde_json::from_str(OUTPUT_EXAMPLE).unwrap();
    }

    #[test]
    fn test_schema_objects_forbid_additional_properties() {
        // Required by strict schema-constrained backends
        let schema = output_schema();
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
        assert_eq!(
            schema["properties"]["result"]["items"]["additionalProperties"],
            serde_json::json!(false)
        );
    }

    #[test]
    fn test_human_prompt_omits_empty_optionals() {
        let batch = vec![Vulnerability {
            vuln_id: "CVE-1".into(),
            pkg_id: "pkg-a".into(),
            title: "T".into(),
            ..Default::default()
        }];
        let human = build_human_prompt(&batch).unwrap();
        assert_eq!(
            human,
            r#"[{"vulnId":"CVE-1","pkgId":"pkg-a","title":"T"}]"#
        );
    }
}
