//! Labsense turns raw extracted lab values plus an optional user profile
//! into a classified, abnormal-first analysis report. Everything here is
//! pure and synchronous: the only shared state is the read-only test
//! catalog, so one analyzer instance can serve any number of threads.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod models;

pub use analysis::{
    aggregate, classify, normalize_value, resolve_range, sort_findings, AnalysisError,
    ReportAnalyzer, StatusCounts,
};
pub use catalog::{CatalogDocument, CatalogError, RangeRule, RuleCondition, TestCatalog};
pub use models::{
    AnalysisReport, Finding, Gender, NarrativeContent, RawReading, TestExplanation, TestStatus,
    UserProfile,
};
