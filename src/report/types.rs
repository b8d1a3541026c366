//! Subset of the Trivy JSON report schema consumed as input.

use serde::{Deserialize, Serialize};

use crate::errors::VexError;
use crate::generator::Vulnerability;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Report {
    pub schema_version: i64,
    pub artifact_name: String,
    pub artifact_type: String,
    pub results: Vec<ScanResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScanResult {
    pub target: String,
    pub class: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub vulnerabilities: Vec<ReportVulnerability>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReportVulnerability {
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: String,
    #[serde(rename = "PkgID")]
    pub pkg_id: String,
    pub title: String,
    pub description: String,
    pub severity: String,
    #[serde(rename = "CweIDs")]
    pub cwe_ids: Vec<String>,
}

impl Report {
    pub fn from_json(s: &str) -> Result<Self, VexError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Flattens the vulnerabilities of every result section, preserving
    /// report order.
    pub fn vulnerabilities(&self) -> Vec<Vulnerability> {
        self.results
            .iter()
            .flat_map(|r| &r.vulnerabilities)
            .map(|v| Vulnerability {
                vuln_id: v.vulnerability_id.clone(),
                pkg_id: v.pkg_id.clone(),
                title: v.title.clone(),
                description: v.description.clone(),
                severity: v.severity.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "SchemaVersion": 2,
        "ArtifactName": "python:3.12.4",
        "ArtifactType": "container_image",
        "Results": [
            {
                "Target": "python:3.12.4 (debian 12.6)",
                "Class": "os-pkgs",
                "Type": "debian",
                "Vulnerabilities": [
                    {
                        "VulnerabilityID": "CVE-2024-0001",
                        "PkgID": "libfoo@1.0",
                        "Title": "foo overflow",
                        "Description": "A buffer overflow in libfoo.",
                        "Severity": "HIGH"
                    }
                ]
            },
            {
                "Target": "app/requirements.txt",
                "Class": "lang-pkgs",
                "Type": "pip",
                "Vulnerabilities": [
                    {
                        "VulnerabilityID": "CVE-2024-0002",
                        "PkgID": "bar@2.0",
                        "Title": "bar DoS",
                        "Severity": "CRITICAL"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_report() {
        let report = Report::from_json(SAMPLE).unwrap();
        assert_eq!(report.artifact_name, "python:3.12.4");
        assert_eq!(report.artifact_type, "container_image");
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_vulnerabilities_flatten_all_results() {
        let report = Report::from_json(SAMPLE).unwrap();
        let vulns = report.vulnerabilities();
        assert_eq!(vulns.len(), 2);
        assert_eq!(vulns[0].vuln_id, "CVE-2024-0001");
        assert_eq!(vulns[0].pkg_id, "libfoo@1.0");
        assert_eq!(vulns[1].vuln_id, "CVE-2024-0002");
        assert_eq!(vulns[1].description, "");
    }

    #[test]
    fn test_missing_fields_default() {
        let report = Report::from_json(r#"{"ArtifactName": "x"}"#).unwrap();
        assert!(report.results.is_empty());
        assert!(report.vulnerabilities().is_empty());
    }
}
