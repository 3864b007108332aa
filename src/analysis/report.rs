use crate::models::{AnalysisReport, Finding, NarrativeContent};

use super::AnalysisError;

/// Assemble the final report from classified findings and the narrative
/// service's free-text fields. Pure assembly: findings are taken in the
/// order given and narrative text is carried verbatim, never parsed.
///
/// A report with neither findings nor a narrative summary has nothing to
/// show the reader and is rejected rather than rendered empty.
pub fn aggregate(
    findings: Vec<Finding>,
    narrative: NarrativeContent,
    report_type: &str,
) -> Result<AnalysisReport, AnalysisError> {
    if findings.is_empty() && narrative.summary.trim().is_empty() {
        return Err(AnalysisError::InvalidReport);
    }
    Ok(AnalysisReport {
        summary: narrative.summary,
        key_findings: findings,
        explanations: narrative.explanations,
        lifestyle_suggestions: narrative.lifestyle_suggestions,
        doctor_consultation_advice: narrative.doctor_consultation_advice,
        disclaimer: narrative.disclaimer,
        report_type: report_type.to_string(),
    })
}
