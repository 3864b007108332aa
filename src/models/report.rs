use serde::{Deserialize, Serialize};

use crate::models::TestStatus;

/// One classified result, ready for display. `test` keeps the reader's own
/// wording (trimmed); `canonical_test_id` is None when the name matched no
/// catalog alias. Optional fields serialize as explicit nulls so the
/// consuming app never has to probe for missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub test: String,
    pub canonical_test_id: Option<String>,
    pub value: f64,
    pub unit: String,
    pub normal_range: Option<String>,
    pub status: TestStatus,
}

/// Per-test narrative from the upstream language service, passed through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestExplanation {
    pub test: String,
    pub meaning: String,
}

/// The free-text half of an analysis request. The engine never parses or
/// branches on any of this content; it only carries it into the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NarrativeContent {
    pub summary: String,
    pub explanations: Vec<TestExplanation>,
    pub lifestyle_suggestions: Vec<String>,
    pub doctor_consultation_advice: String,
    pub disclaimer: String,
}

/// The structured output of one analysis request. Field names and status
/// strings are a wire contract shared with the consuming app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: String,
    pub key_findings: Vec<Finding>,
    pub explanations: Vec<TestExplanation>,
    pub lifestyle_suggestions: Vec<String>,
    pub doctor_consultation_advice: String,
    pub disclaimer: String,
    pub report_type: String,
}
