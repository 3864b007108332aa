use crate::catalog::CanonicalTest;

use super::AnalysisError;

/// Convert a raw reading's value into the test's canonical unit.
///
/// The canonical-unit path is an exact identity: the value comes back
/// untouched, with no multiplication that could drift it. An unregistered
/// unit is an error for the caller to absorb; the engine never guesses a
/// conversion.
pub fn normalize_value(
    test: &CanonicalTest,
    value: f64,
    raw_unit: &str,
) -> Result<f64, AnalysisError> {
    if test.is_canonical_unit(raw_unit) {
        return Ok(value);
    }
    match test.conversion_for(raw_unit) {
        Some(conversion) => Ok(conversion.apply(value)),
        None => Err(AnalysisError::UnknownUnit {
            test_id: test.id.clone(),
            unit: raw_unit.to_string(),
        }),
    }
}
