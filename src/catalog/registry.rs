use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::builtin;
use super::types::{unit_key, CanonicalTest, CatalogDocument, UnitConversion};
use super::CatalogError;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Whole-token shorthand substitutions tried after an exact alias miss.
/// Tokens only: "hb" expands, "hba1c" does not.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("hb", "hemoglobin"),
    ("hgb", "hemoglobin"),
    ("gluc", "glucose"),
    ("chol", "cholesterol"),
    ("creat", "creatinine"),
    ("trig", "triglycerides"),
    ("trigs", "triglycerides"),
    ("plt", "platelets"),
];

/// Normalize a raw test name for alias lookup: trimmed, lowercased,
/// internal whitespace collapsed to single spaces.
pub fn normalize_test_name(raw: &str) -> String {
    RE_WHITESPACE
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

fn expand_abbreviations(normalized: &str) -> String {
    normalized
        .split(' ')
        .map(|token| {
            ABBREVIATIONS
                .iter()
                .find(|(abbreviation, _)| *abbreviation == token)
                .map(|(_, expansion)| *expansion)
                .unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The static test registry: alias lookup plus per-test range rules.
/// Built and validated once at startup, then shared read-only across
/// requests; nothing here mutates after `build` returns.
#[derive(Debug, Clone)]
pub struct TestCatalog {
    tests: HashMap<String, CanonicalTest>,
    aliases: HashMap<String, String>,
    warnings: Vec<String>,
}

impl TestCatalog {
    /// Validate a catalog document and build the runtime registry.
    ///
    /// Structural defects (duplicate ids or aliases, rules pointing at
    /// nonexistent tests, missing default rules, non-invertible
    /// conversions) are errors. Suspicious-but-servable authoring, such
    /// as a critical bound inside the normal range or rules shadowed by
    /// an earlier default, is collected into [`warnings`](Self::warnings)
    /// and logged.
    pub fn build(document: CatalogDocument) -> Result<Self, CatalogError> {
        if document.tests.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut tests: HashMap<String, CanonicalTest> = HashMap::new();
        let mut aliases: HashMap<String, String> = HashMap::new();
        let mut ordered_ids: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        for definition in document.tests {
            if tests.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateTestId(definition.id));
            }

            // The id itself resolves like any alias.
            for alias in definition.aliases.iter().chain(std::iter::once(&definition.id)) {
                let key = normalize_test_name(alias);
                match aliases.get(&key) {
                    Some(owner) if owner != &definition.id => {
                        return Err(CatalogError::DuplicateAlias {
                            alias: key,
                            first: owner.clone(),
                            second: definition.id.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(key, definition.id.clone());
                    }
                }
            }

            let mut conversions: HashMap<String, UnitConversion> = HashMap::new();
            for (spelling, conversion) in definition.conversions {
                if !conversion.is_invertible() {
                    return Err(CatalogError::NonInvertibleConversion {
                        test_id: definition.id,
                        unit: spelling,
                    });
                }
                let key = unit_key(&spelling);
                if let Some(previous) = conversions.insert(key.clone(), conversion) {
                    if previous != conversion {
                        return Err(CatalogError::ConflictingConversion {
                            test_id: definition.id,
                            unit_key: key,
                        });
                    }
                }
            }

            ordered_ids.push(definition.id.clone());
            tests.insert(
                definition.id.clone(),
                CanonicalTest {
                    id: definition.id,
                    display_name: definition.display_name,
                    canonical_unit: definition.canonical_unit,
                    conversions,
                    rules: Vec::new(),
                },
            );
        }

        // Attach rules in document order; per-test order is evaluation order.
        for rule in document.rules {
            let Some(test) = tests.get_mut(&rule.test_id) else {
                return Err(CatalogError::UnknownTestId(rule.test_id));
            };
            test.rules.push(rule);
        }

        for id in &ordered_ids {
            let test = &tests[id];
            let Some(default_position) =
                test.rules.iter().position(|rule| rule.condition.is_default())
            else {
                return Err(CatalogError::MissingDefaultRule(id.clone()));
            };
            let shadowed = test.rules.len() - default_position - 1;
            if shadowed > 0 {
                warnings.push(format!(
                    "Test '{id}': {shadowed} rule(s) registered after the default rule can never match"
                ));
            }
            for rule in &test.rules {
                if rule.low > rule.high {
                    warnings.push(format!(
                        "Test '{id}': rule low {} exceeds high {}",
                        rule.low, rule.high
                    ));
                }
                if let Some(bound) = rule.critical_high {
                    if bound < rule.high {
                        warnings.push(format!(
                            "Test '{id}': critical_high {bound} sits below high {}",
                            rule.high
                        ));
                    }
                }
                if let Some(bound) = rule.critical_low {
                    if bound > rule.low {
                        warnings.push(format!(
                            "Test '{id}': critical_low {bound} sits above low {}",
                            rule.low
                        ));
                    }
                }
            }
        }

        if !warnings.is_empty() {
            tracing::warn!(
                warning_count = warnings.len(),
                "Catalog built with authoring warnings"
            );
        }

        Ok(Self {
            tests,
            aliases,
            warnings,
        })
    }

    /// Parse a JSON catalog document and build it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::build(document)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(path.display().to_string(), e.to_string()))?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            tests = catalog.len(),
            "Loaded test catalog"
        );
        Ok(catalog)
    }

    /// The bundled standard catalog. Its validity is pinned by tests, so
    /// the expect guards a compile-time-authored invariant, not input.
    pub fn builtin() -> Self {
        Self::build(builtin::standard_document()).expect("bundled test catalog is valid")
    }

    /// Resolve a raw test name to its catalog entry: exact alias match
    /// first, then one retry with whole-token abbreviations expanded.
    pub fn resolve(&self, raw_name: &str) -> Option<&CanonicalTest> {
        let normalized = normalize_test_name(raw_name);
        if let Some(id) = self.aliases.get(&normalized) {
            return self.tests.get(id);
        }
        let expanded = expand_abbreviations(&normalized);
        if expanded != normalized {
            if let Some(id) = self.aliases.get(&expanded) {
                return self.tests.get(id);
            }
        }
        None
    }

    /// Fetch a test by its canonical id.
    pub fn get(&self, test_id: &str) -> Option<&CanonicalTest> {
        self.tests.get(test_id)
    }

    /// All registered tests, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalTest> {
        self.tests.values()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Authoring warnings collected while building. Empty for a clean
    /// catalog; the bundled catalog is required to keep it that way.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
