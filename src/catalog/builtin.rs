use super::types::UnitConversion::{Affine, Identity, Scale};
use super::types::{CatalogDocument, RangeRule, RuleCondition, TestDefinition, UnitConversion};
use crate::models::Gender;

fn test(
    id: &str,
    display_name: &str,
    aliases: &[&str],
    canonical_unit: &str,
    conversions: &[(&str, UnitConversion)],
) -> TestDefinition {
    TestDefinition {
        id: id.into(),
        display_name: display_name.into(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
        canonical_unit: canonical_unit.into(),
        conversions: conversions
            .iter()
            .map(|(spelling, conversion)| (spelling.to_string(), *conversion))
            .collect(),
    }
}

fn rule(test_id: &str, condition: RuleCondition, low: f64, high: f64) -> RangeRule {
    RangeRule {
        test_id: test_id.into(),
        condition,
        low,
        high,
        critical_low: None,
        critical_high: None,
    }
}

fn critical(
    test_id: &str,
    condition: RuleCondition,
    low: f64,
    high: f64,
    critical_low: Option<f64>,
    critical_high: Option<f64>,
) -> RangeRule {
    RangeRule {
        test_id: test_id.into(),
        condition,
        low,
        high,
        critical_low,
        critical_high,
    }
}

fn female() -> RuleCondition {
    RuleCondition::Gender(Gender::Female)
}

fn male() -> RuleCondition {
    RuleCondition::Gender(Gender::Male)
}

/// The catalog bundled with the engine: common blood-panel tests, the unit
/// spellings labs actually print, and widely published adult reference
/// intervals. Canonical units follow US lab convention because that is what
/// the consuming app displays. Per test, specific rules come first and the
/// unconditional fallback last; rule order is match order.
pub fn standard_document() -> CatalogDocument {
    use RuleCondition::{AgeAtLeast, AgeUnder, All, Any, HasCondition};

    CatalogDocument {
        tests: vec![
            // Hematology
            test(
                "hemoglobin",
                "Hemoglobin",
                &["haemoglobin"],
                "g/dL",
                &[("g/L", Scale(0.1)), ("mmol/L", Scale(1.6113))],
            ),
            test(
                "wbc",
                "White blood cells",
                &["white blood cells", "white blood cell count", "leukocytes", "wbc count"],
                "10^9/L",
                &[
                    ("10^3/µL", Identity),
                    ("cells/µL", Scale(0.001)),
                    ("/µL", Scale(0.001)),
                ],
            ),
            test(
                "platelets",
                "Platelets",
                &["platelet count", "plt count", "thrombocytes"],
                "10^9/L",
                &[("10^3/µL", Identity), ("cells/µL", Scale(0.001))],
            ),
            // Metabolic
            test(
                "glucose",
                "Glucose (fasting)",
                &[
                    "blood glucose",
                    "fasting glucose",
                    "glucose fasting",
                    "blood sugar",
                    "fasting blood sugar",
                ],
                "mg/dL",
                &[("mmol/L", Scale(18.016)), ("g/L", Scale(100.0))],
            ),
            test(
                "hba1c",
                "Hemoglobin A1c",
                &["a1c", "hemoglobin a1c", "glycated hemoglobin", "glycohemoglobin"],
                "%",
                &[(
                    "mmol/mol",
                    Affine {
                        scale: 0.0915,
                        offset: 2.15,
                    },
                )],
            ),
            test(
                "creatinine",
                "Creatinine",
                &["serum creatinine"],
                "mg/dL",
                &[("µmol/L", Scale(0.0113)), ("mg/L", Scale(0.1))],
            ),
            test(
                "potassium",
                "Potassium",
                &["k+", "serum potassium"],
                "mmol/L",
                &[("mEq/L", Identity), ("mg/dL", Scale(0.2558))],
            ),
            test(
                "sodium",
                "Sodium",
                &["na+", "serum sodium"],
                "mmol/L",
                &[("mEq/L", Identity)],
            ),
            // Lipids
            test(
                "cholesterol_total",
                "Total cholesterol",
                &["cholesterol", "total cholesterol"],
                "mg/dL",
                &[("mmol/L", Scale(38.67)), ("g/L", Scale(100.0))],
            ),
            test(
                "hdl",
                "HDL cholesterol",
                &["hdl cholesterol", "hdl-c"],
                "mg/dL",
                &[("mmol/L", Scale(38.67))],
            ),
            test(
                "ldl",
                "LDL cholesterol",
                &["ldl cholesterol", "ldl-c"],
                "mg/dL",
                &[("mmol/L", Scale(38.67))],
            ),
            test(
                "triglycerides",
                "Triglycerides",
                &["tg"],
                "mg/dL",
                &[("mmol/L", Scale(88.57)), ("g/L", Scale(100.0))],
            ),
            // Endocrine and organ function
            test(
                "tsh",
                "Thyroid-stimulating hormone",
                &["thyroid stimulating hormone", "thyrotropin"],
                "mIU/L",
                &[("µIU/mL", Identity), ("mU/L", Identity)],
            ),
            test(
                "alt",
                "Alanine aminotransferase",
                &["alanine aminotransferase", "sgpt", "alat"],
                "U/L",
                &[("µkat/L", Scale(60.0)), ("IU/L", Identity)],
            ),
            test(
                "vitamin_d",
                "Vitamin D (25-OH)",
                &["vitamin d", "25-oh vitamin d", "25-hydroxyvitamin d", "vit d"],
                "ng/mL",
                &[("nmol/L", Scale(0.4006))],
            ),
        ],
        rules: vec![
            critical("hemoglobin", AgeUnder(18), 11.0, 16.0, Some(7.0), Some(20.0)),
            critical("hemoglobin", female(), 12.0, 15.5, Some(7.0), Some(20.0)),
            critical("hemoglobin", male(), 13.5, 17.5, Some(7.0), Some(20.0)),
            critical("hemoglobin", Any, 12.0, 17.5, Some(7.0), Some(20.0)),
            critical("wbc", AgeUnder(2), 6.0, 17.0, Some(1.0), Some(50.0)),
            critical("wbc", Any, 4.0, 11.0, Some(1.0), Some(50.0)),
            critical("platelets", Any, 150.0, 400.0, Some(20.0), Some(1000.0)),
            critical(
                "glucose",
                All(vec![female(), HasCondition("pregnancy".into())]),
                70.0,
                95.0,
                Some(40.0),
                Some(300.0),
            ),
            critical(
                "glucose",
                HasCondition("diabetes".into()),
                70.0,
                130.0,
                Some(40.0),
                Some(300.0),
            ),
            critical("glucose", Any, 70.0, 100.0, Some(40.0), Some(300.0)),
            rule("hba1c", HasCondition("diabetes".into()), 4.0, 7.0),
            rule("hba1c", Any, 4.0, 5.6),
            critical("creatinine", female(), 0.59, 1.04, None, Some(5.0)),
            critical("creatinine", male(), 0.74, 1.35, None, Some(5.0)),
            critical("creatinine", Any, 0.59, 1.35, None, Some(5.0)),
            critical("potassium", Any, 3.5, 5.0, Some(2.5), Some(6.5)),
            critical("sodium", Any, 135.0, 145.0, Some(120.0), Some(160.0)),
            rule("cholesterol_total", Any, 125.0, 200.0),
            rule("hdl", female(), 50.0, 90.0),
            rule("hdl", male(), 40.0, 90.0),
            rule("hdl", Any, 40.0, 90.0),
            rule("ldl", HasCondition("heart disease".into()), 40.0, 70.0),
            rule("ldl", Any, 40.0, 130.0),
            critical("triglycerides", Any, 30.0, 150.0, None, Some(1000.0)),
            rule("tsh", AgeAtLeast(65), 0.4, 6.0),
            rule("tsh", Any, 0.4, 4.0),
            critical("alt", male(), 10.0, 40.0, None, Some(1000.0)),
            critical("alt", female(), 7.0, 35.0, None, Some(1000.0)),
            critical("alt", Any, 7.0, 56.0, None, Some(1000.0)),
            critical("vitamin_d", Any, 30.0, 100.0, Some(10.0), Some(150.0)),
        ],
    }
}
