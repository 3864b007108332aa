use crate::catalog::RangeRule;
use crate::models::TestStatus;

type BoundCheck = fn(f64, &RangeRule) -> bool;

/// Ordered decision table: the first matching row wins and the fallthrough
/// is `Normal`. Critical bounds come first and use inclusive comparisons,
/// so a value exactly at a critical bound is critical, while a value
/// exactly at `low`/`high` is normal.
const DECISION_TABLE: &[(BoundCheck, TestStatus)] = &[
    (at_or_above_critical_high, TestStatus::CriticalHigh),
    (at_or_below_critical_low, TestStatus::CriticalLow),
    (above_high, TestStatus::High),
    (below_low, TestStatus::Low),
];

fn at_or_above_critical_high(value: f64, rule: &RangeRule) -> bool {
    rule.critical_high.is_some_and(|bound| value >= bound)
}

fn at_or_below_critical_low(value: f64, rule: &RangeRule) -> bool {
    rule.critical_low.is_some_and(|bound| value <= bound)
}

fn above_high(value: f64, rule: &RangeRule) -> bool {
    value > rule.high
}

fn below_low(value: f64, rule: &RangeRule) -> bool {
    value < rule.low
}

/// Classify a canonical-unit value against a resolved rule.
///
/// Classification trusts the rule as authored: a critical bound placed
/// inside the normal range still dominates, because the table is ordered,
/// not because the bounds were re-checked here. Catalog load is where such
/// authoring gets flagged.
pub fn classify(value: f64, rule: &RangeRule) -> TestStatus {
    DECISION_TABLE
        .iter()
        .find(|(check, _)| check(value, rule))
        .map(|(_, status)| *status)
        .unwrap_or(TestStatus::Normal)
}
