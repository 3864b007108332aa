use crate::models::Finding;

/// Order findings for presentation: everything abnormal (any status other
/// than `normal`, `unknown` included) ahead of normal results. The sort is
/// stable, so within each group the extraction order of the source report
/// is preserved, and re-sorting an already-sorted list changes nothing.
pub fn sort_findings(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by_key(|finding| !finding.status.is_abnormal());
    findings
}
