use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Gender, UserProfile};

// ---------------------------------------------------------------------------
// Unit keys
// ---------------------------------------------------------------------------

/// Normalize a unit string into its lookup key: lowercased, with whitespace
/// and the separators `/`, `^`, `*` stripped, and both micro signs folded to
/// ASCII `u`. "mg/dL", "mg/dl" and "mg / dL" all share one key.
pub fn unit_key(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '^' | '*'))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'µ' || c == 'μ' { 'u' } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// UnitConversion
// ---------------------------------------------------------------------------

/// How a value in some accepted unit maps onto the canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitConversion {
    /// Same magnitude under a different spelling, e.g. mEq/L vs mmol/L for
    /// monovalent ions. Applied without arithmetic so the value cannot
    /// accumulate float error.
    Identity,
    /// Multiply by a constant factor.
    Scale(f64),
    /// `value * scale + offset`, e.g. IFCC mmol/mol to NGSP percent.
    Affine { scale: f64, offset: f64 },
}

impl UnitConversion {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            UnitConversion::Identity => value,
            UnitConversion::Scale(factor) => value * factor,
            UnitConversion::Affine { scale, offset } => value * scale + offset,
        }
    }

    pub fn invert(&self, value: f64) -> f64 {
        match self {
            UnitConversion::Identity => value,
            UnitConversion::Scale(factor) => value / factor,
            UnitConversion::Affine { scale, offset } => (value - offset) / scale,
        }
    }

    /// A conversion must be a finite bijection: a zero or non-finite
    /// parameter cannot be inverted, and catalog load rejects it. NaN in
    /// particular would otherwise sail through `!= 0.0`.
    pub fn is_invertible(&self) -> bool {
        match self {
            UnitConversion::Identity => true,
            UnitConversion::Scale(factor) => factor.is_finite() && *factor != 0.0,
            UnitConversion::Affine { scale, offset } => {
                scale.is_finite() && *scale != 0.0 && offset.is_finite()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RuleCondition
// ---------------------------------------------------------------------------

/// Profile predicate attached to a range rule, kept as data so catalog
/// documents stay auditable. A predicate over a profile field that is not
/// set evaluates to false, never to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    /// Matches every profile; the population-wide default.
    Any,
    Gender(Gender),
    /// `age >= n`; false when age is unknown.
    AgeAtLeast(u32),
    /// `age < n`; false when age is unknown.
    AgeUnder(u32),
    /// Case-insensitive membership in the profile's declared conditions.
    HasCondition(String),
    /// Every nested condition must match.
    All(Vec<RuleCondition>),
}

impl RuleCondition {
    pub fn matches(&self, profile: &UserProfile) -> bool {
        match self {
            RuleCondition::Any => true,
            RuleCondition::Gender(gender) => profile.gender == *gender,
            RuleCondition::AgeAtLeast(years) => profile.age.is_some_and(|age| age >= *years),
            RuleCondition::AgeUnder(years) => profile.age.is_some_and(|age| age < *years),
            RuleCondition::HasCondition(name) => profile.has_condition(name),
            RuleCondition::All(parts) => parts.iter().all(|part| part.matches(profile)),
        }
    }

    /// True for the unconditional fallback rule every test must carry.
    pub fn is_default(&self) -> bool {
        matches!(self, RuleCondition::Any)
    }
}

// ---------------------------------------------------------------------------
// RangeRule
// ---------------------------------------------------------------------------

/// One reference-range rule. Rules for a test are evaluated in registration
/// order and the first whose condition matches the profile wins, so more
/// specific rules must be registered before the `Any` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    pub test_id: String,
    pub condition: RuleCondition,
    pub low: f64,
    pub high: f64,
    #[serde(default)]
    pub critical_low: Option<f64>,
    #[serde(default)]
    pub critical_high: Option<f64>,
}

// ---------------------------------------------------------------------------
// Catalog documents
// ---------------------------------------------------------------------------

/// A test as authored in a catalog document. `conversions` maps accepted
/// unit spellings to their conversion into `canonical_unit`; spellings are
/// normalized through [`unit_key`] at load, so authors can write them the
/// readable way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub canonical_unit: String,
    #[serde(default)]
    pub conversions: HashMap<String, UnitConversion>,
}

/// The pure-data shape of a catalog: definitions plus a flat rule list.
/// This is what a JSON catalog file deserializes into and what the bundled
/// catalog constructs; validation happens when it is built into a
/// [`TestCatalog`](crate::catalog::TestCatalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub tests: Vec<TestDefinition>,
    pub rules: Vec<RangeRule>,
}

// ---------------------------------------------------------------------------
// CanonicalTest
// ---------------------------------------------------------------------------

/// A validated, registered test: its definition plus its range rules in
/// registration order, with conversion keys pre-normalized for lookup.
#[derive(Debug, Clone)]
pub struct CanonicalTest {
    pub id: String,
    pub display_name: String,
    pub canonical_unit: String,
    pub(crate) conversions: HashMap<String, UnitConversion>,
    pub(crate) rules: Vec<RangeRule>,
}

impl CanonicalTest {
    /// The conversion registered for a raw unit spelling, if any.
    pub fn conversion_for(&self, raw_unit: &str) -> Option<&UnitConversion> {
        self.conversions.get(&unit_key(raw_unit))
    }

    /// Whether a raw unit spelling is this test's canonical unit.
    pub fn is_canonical_unit(&self, raw_unit: &str) -> bool {
        unit_key(raw_unit) == unit_key(&self.canonical_unit)
    }

    /// Range rules in registration order.
    pub fn rules(&self) -> &[RangeRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_key_folds_case_whitespace_and_separators() {
        assert_eq!(unit_key("mg/dL"), "mgdl");
        assert_eq!(unit_key("MG / DL"), "mgdl");
        assert_eq!(unit_key("10^9/L"), "109l");
        assert_eq!(unit_key("10*9/L"), "109l");
        assert_eq!(unit_key(" mmol/L "), "mmoll");
    }

    #[test]
    fn unit_key_folds_micro_signs() {
        // U+00B5 micro sign and U+03BC Greek mu collapse to the same key
        assert_eq!(unit_key("µmol/L"), "umoll");
        assert_eq!(unit_key("μmol/L"), "umoll");
        assert_eq!(unit_key("umol/L"), "umoll");
    }

    #[test]
    fn scale_conversion_round_trips_within_tolerance() {
        let conversion = UnitConversion::Scale(18.016);
        for value in [0.1, 3.9, 5.5, 27.75] {
            let there = conversion.apply(value);
            let back = conversion.invert(there);
            assert!((back - value).abs() < 1e-9, "{value} drifted to {back}");
        }
    }

    #[test]
    fn affine_conversion_round_trips_within_tolerance() {
        let conversion = UnitConversion::Affine {
            scale: 0.0915,
            offset: 2.15,
        };
        for value in [20.0, 48.0, 86.0, 119.3] {
            let there = conversion.apply(value);
            let back = conversion.invert(there);
            assert!((back - value).abs() < 1e-9, "{value} drifted to {back}");
        }
    }

    #[test]
    fn identity_conversion_never_touches_the_value() {
        assert_eq!(UnitConversion::Identity.apply(4.37), 4.37);
        assert_eq!(UnitConversion::Identity.invert(4.37), 4.37);
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        assert!(!UnitConversion::Scale(0.0).is_invertible());
        assert!(!UnitConversion::Affine {
            scale: 0.0,
            offset: 1.0
        }
        .is_invertible());
        assert!(UnitConversion::Scale(18.016).is_invertible());
        assert!(UnitConversion::Identity.is_invertible());
    }

    #[test]
    fn non_finite_parameters_are_not_invertible() {
        assert!(!UnitConversion::Scale(f64::NAN).is_invertible());
        assert!(!UnitConversion::Scale(f64::INFINITY).is_invertible());
        assert!(!UnitConversion::Scale(f64::NEG_INFINITY).is_invertible());
        assert!(!UnitConversion::Affine {
            scale: f64::NAN,
            offset: 0.0
        }
        .is_invertible());
        assert!(!UnitConversion::Affine {
            scale: 1.0,
            offset: f64::INFINITY
        }
        .is_invertible());
    }

    #[test]
    fn conditions_over_missing_fields_are_false() {
        let empty = UserProfile::default();
        assert!(RuleCondition::Any.matches(&empty));
        assert!(!RuleCondition::AgeAtLeast(18).matches(&empty));
        assert!(!RuleCondition::AgeUnder(18).matches(&empty));
        assert!(!RuleCondition::Gender(Gender::Female).matches(&empty));
        assert!(!RuleCondition::HasCondition("diabetes".into()).matches(&empty));
    }

    #[test]
    fn all_condition_requires_every_part() {
        let profile = UserProfile {
            age: Some(30),
            gender: Gender::Female,
            conditions: std::collections::HashSet::from(["pregnancy".to_string()]),
        };
        let both = RuleCondition::All(vec![
            RuleCondition::Gender(Gender::Female),
            RuleCondition::HasCondition("pregnancy".into()),
        ]);
        let mismatch = RuleCondition::All(vec![
            RuleCondition::Gender(Gender::Male),
            RuleCondition::HasCondition("pregnancy".into()),
        ]);
        assert!(both.matches(&profile));
        assert!(!mismatch.matches(&profile));
    }

    #[test]
    fn age_bounds_are_half_open() {
        let seventeen = UserProfile {
            age: Some(17),
            ..Default::default()
        };
        let eighteen = UserProfile {
            age: Some(18),
            ..Default::default()
        };
        assert!(RuleCondition::AgeUnder(18).matches(&seventeen));
        assert!(!RuleCondition::AgeUnder(18).matches(&eighteen));
        assert!(RuleCondition::AgeAtLeast(18).matches(&eighteen));
    }

    #[test]
    fn condition_serde_is_snake_case_data() {
        assert_eq!(
            serde_json::to_value(RuleCondition::Any).unwrap(),
            serde_json::json!("any")
        );
        assert_eq!(
            serde_json::to_value(RuleCondition::AgeAtLeast(65)).unwrap(),
            serde_json::json!({"age_at_least": 65})
        );
        let parsed: RuleCondition =
            serde_json::from_value(serde_json::json!({"gender": "male"})).unwrap();
        assert_eq!(parsed, RuleCondition::Gender(Gender::Male));
    }
}
