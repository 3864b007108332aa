use std::time::Instant;

use crate::catalog::{CanonicalTest, TestCatalog};
use crate::models::{
    AnalysisReport, Finding, NarrativeContent, RawReading, TestStatus, UserProfile,
};

use super::classify::classify;
use super::ranges::{format_normal_range, matching_rule};
use super::report::aggregate;
use super::sort::sort_findings;
use super::units::normalize_value;
use super::AnalysisError;

/// Per-status tally for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub normal: usize,
    pub high: usize,
    pub low: usize,
    pub critical_high: usize,
    pub critical_low: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.status {
                TestStatus::Normal => counts.normal += 1,
                TestStatus::High => counts.high += 1,
                TestStatus::Low => counts.low += 1,
                TestStatus::CriticalHigh => counts.critical_high += 1,
                TestStatus::CriticalLow => counts.critical_low += 1,
                TestStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.normal + self.high + self.low + self.critical_high + self.critical_low + self.unknown
    }

    pub fn abnormal(&self) -> usize {
        self.total() - self.normal
    }
}

/// The classification engine: a validated, read-only catalog plus the pure
/// pipeline over it. One analyzer serves any number of threads; every call
/// depends only on its arguments and the catalog.
pub struct ReportAnalyzer {
    catalog: TestCatalog,
}

impl ReportAnalyzer {
    pub fn new(catalog: TestCatalog) -> Self {
        Self { catalog }
    }

    pub fn with_builtin_catalog() -> Self {
        Self::new(TestCatalog::builtin())
    }

    pub fn catalog(&self) -> &TestCatalog {
        &self.catalog
    }

    /// Classify every reading against the profile and order the result
    /// abnormal-first. One bad reading never poisons its neighbors: name
    /// and unit failures degrade that reading to `unknown` and the rest
    /// proceed.
    pub fn analyze(&self, readings: &[RawReading], profile: &UserProfile) -> Vec<Finding> {
        let start = Instant::now();

        let findings: Vec<Finding> = readings
            .iter()
            .map(|reading| analyze_reading(&self.catalog, reading, profile))
            .collect();
        let counts = StatusCounts::tally(&findings);

        tracing::info!(
            readings = readings.len(),
            abnormal = counts.abnormal(),
            unknown = counts.unknown,
            processing_ms = start.elapsed().as_millis() as u64,
            "Report analysis complete"
        );

        sort_findings(findings)
    }

    /// Full request path: classify, sort, then assemble the report around
    /// the narrative fields.
    pub fn build_report(
        &self,
        readings: &[RawReading],
        profile: &UserProfile,
        narrative: NarrativeContent,
        report_type: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let findings = self.analyze(readings, profile);
        aggregate(findings, narrative, report_type)
    }
}

fn resolve_test<'a>(
    catalog: &'a TestCatalog,
    raw_name: &str,
) -> Result<&'a CanonicalTest, AnalysisError> {
    catalog
        .resolve(raw_name)
        .ok_or_else(|| AnalysisError::UnrecognizedTest(raw_name.to_string()))
}

/// Classify one reading. The degradation points (unresolvable name,
/// unregistered unit, non-finite value before or after conversion) all land
/// on `Unknown` with the raw value and unit preserved, so the reader still
/// sees what the lab printed.
fn analyze_reading(catalog: &TestCatalog, reading: &RawReading, profile: &UserProfile) -> Finding {
    let display_name = reading.test_name_raw.trim();

    let test = match resolve_test(catalog, display_name) {
        Ok(test) => test,
        Err(error) => {
            tracing::warn!(error = %error, "Reading degraded to unknown");
            return unknown_finding(display_name, None, reading);
        }
    };

    if !reading.value.is_finite() {
        tracing::warn!(test = %test.id, value = reading.value, "Non-finite value in reading");
        return unknown_finding(display_name, Some(test.id.clone()), reading);
    }

    let value = match normalize_value(test, reading.value, &reading.unit_raw) {
        // A finite reading can still overflow through a conversion; a
        // non-finite result would fall through every classification bound.
        Ok(value) if value.is_finite() => value,
        Ok(value) => {
            tracing::warn!(test = %test.id, value, "Conversion produced a non-finite value");
            return unknown_finding(display_name, Some(test.id.clone()), reading);
        }
        Err(error) => {
            tracing::warn!(test = %test.id, unit = %reading.unit_raw, error = %error, "Unit not convertible");
            return unknown_finding(display_name, Some(test.id.clone()), reading);
        }
    };

    match matching_rule(test, profile) {
        Some(rule) => Finding {
            test: display_name.to_string(),
            canonical_test_id: Some(test.id.clone()),
            value,
            unit: test.canonical_unit.clone(),
            normal_range: Some(format_normal_range(rule, &test.canonical_unit)),
            status: classify(value, rule),
        },
        // Unreachable for any validated catalog; degrade rather than panic.
        None => Finding {
            test: display_name.to_string(),
            canonical_test_id: Some(test.id.clone()),
            value,
            unit: test.canonical_unit.clone(),
            normal_range: None,
            status: TestStatus::Unknown,
        },
    }
}

fn unknown_finding(
    display_name: &str,
    canonical_test_id: Option<String>,
    reading: &RawReading,
) -> Finding {
    Finding {
        test: display_name.to_string(),
        canonical_test_id,
        value: reading.value,
        unit: reading.unit_raw.clone(),
        normal_range: None,
        status: TestStatus::Unknown,
    }
}
