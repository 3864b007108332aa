use crate::catalog::{CanonicalTest, RangeRule, TestCatalog};
use crate::models::UserProfile;

/// First rule in registration order whose condition matches the profile.
/// Catalog validation guarantees every registered test carries an
/// unconditional fallback, so this only returns None for an unknown id.
pub fn resolve_range<'a>(
    catalog: &'a TestCatalog,
    test_id: &str,
    profile: &UserProfile,
) -> Option<&'a RangeRule> {
    catalog.get(test_id).and_then(|test| matching_rule(test, profile))
}

/// Rule selection for an already-resolved test.
pub fn matching_rule<'a>(test: &'a CanonicalTest, profile: &UserProfile) -> Option<&'a RangeRule> {
    test.rules().iter().find(|rule| rule.condition.matches(profile))
}

/// Display form of a resolved range: `"{low}-{high} {unit}"`.
pub fn format_normal_range(rule: &RangeRule, unit: &str) -> String {
    format!("{}-{} {}", rule.low, rule.high, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RuleCondition, TestCatalog};
    use crate::models::Gender;
    use std::collections::HashSet;

    fn profile(age: Option<u32>, gender: Gender, conditions: &[&str]) -> UserProfile {
        UserProfile {
            age,
            gender,
            conditions: conditions.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn adult_female_gets_the_female_hemoglobin_range() {
        let catalog = TestCatalog::builtin();
        let rule = resolve_range(
            &catalog,
            "hemoglobin",
            &profile(Some(34), Gender::Female, &[]),
        )
        .unwrap();
        assert_eq!((rule.low, rule.high), (12.0, 15.5));
    }

    #[test]
    fn child_rule_outranks_gender_rules() {
        let catalog = TestCatalog::builtin();
        let rule = resolve_range(
            &catalog,
            "hemoglobin",
            &profile(Some(9), Gender::Female, &[]),
        )
        .unwrap();
        assert_eq!((rule.low, rule.high), (11.0, 16.0));
    }

    #[test]
    fn empty_profile_falls_back_to_the_default_rule() {
        let catalog = TestCatalog::builtin();
        let rule = resolve_range(&catalog, "hemoglobin", &UserProfile::default()).unwrap();
        assert_eq!((rule.low, rule.high), (12.0, 17.5));
        assert_eq!(rule.condition, RuleCondition::Any);
    }

    #[test]
    fn declared_condition_selects_the_condition_range() {
        let catalog = TestCatalog::builtin();
        let rule = resolve_range(
            &catalog,
            "glucose",
            &profile(Some(51), Gender::Male, &["Diabetes"]),
        )
        .unwrap();
        assert_eq!((rule.low, rule.high), (70.0, 130.0));
    }

    #[test]
    fn combined_condition_outranks_single_condition() {
        let catalog = TestCatalog::builtin();
        // pregnant and diabetic: the gestational rule is registered first
        let rule = resolve_range(
            &catalog,
            "glucose",
            &profile(Some(29), Gender::Female, &["pregnancy", "diabetes"]),
        )
        .unwrap();
        assert_eq!((rule.low, rule.high), (70.0, 95.0));
    }

    #[test]
    fn elderly_rule_applies_at_the_boundary() {
        let catalog = TestCatalog::builtin();
        let at_sixty_five = resolve_range(&catalog, "tsh", &profile(Some(65), Gender::Unknown, &[]))
            .unwrap();
        let at_sixty_four = resolve_range(&catalog, "tsh", &profile(Some(64), Gender::Unknown, &[]))
            .unwrap();
        assert_eq!(at_sixty_five.high, 6.0);
        assert_eq!(at_sixty_four.high, 4.0);
    }

    #[test]
    fn unknown_test_id_resolves_to_none() {
        let catalog = TestCatalog::builtin();
        assert!(resolve_range(&catalog, "midichlorians", &UserProfile::default()).is_none());
    }

    #[test]
    fn range_display_drops_trailing_zeroes() {
        let catalog = TestCatalog::builtin();
        let rule = resolve_range(
            &catalog,
            "hemoglobin",
            &profile(Some(34), Gender::Female, &[]),
        )
        .unwrap();
        assert_eq!(format_normal_range(rule, "g/dL"), "12-15.5 g/dL");
    }
}
