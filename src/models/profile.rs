use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Gender;

/// Profile attributes that parametrize reference-range selection. Every
/// field is optional on the wire; whatever is absent simply falls back to
/// population-wide ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub gender: Gender,
    pub conditions: HashSet<String>,
}

impl UserProfile {
    /// Case-insensitive membership test over the declared conditions.
    pub fn has_condition(&self, condition: &str) -> bool {
        let needle = condition.to_lowercase();
        self.conditions.iter().any(|c| c.to_lowercase() == needle)
    }
}
