use crate::models::ModelError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serialized form matches as_str, so wire strings and in-process strings
/// can never drift apart.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(TestStatus {
    Normal => "normal",
    High => "high",
    Low => "low",
    CriticalHigh => "critical_high",
    CriticalLow => "critical_low",
    Unknown => "unknown",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
    Unknown => "unknown",
});

impl TestStatus {
    /// Everything that is not squarely normal, including `Unknown`: a value
    /// the engine could not classify still deserves the reader's attention.
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, TestStatus::Normal)
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for (variant, s) in [
            (TestStatus::Normal, "normal"),
            (TestStatus::High, "high"),
            (TestStatus::Low, "low"),
            (TestStatus::CriticalHigh, "critical_high"),
            (TestStatus::CriticalLow, "critical_low"),
            (TestStatus::Unknown, "unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(TestStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn gender_round_trip() {
        for (variant, s) in [
            (Gender::Male, "male"),
            (Gender::Female, "female"),
            (Gender::Other, "other"),
            (Gender::Unknown, "unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Gender::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(
            serde_json::to_value(TestStatus::CriticalHigh).unwrap(),
            serde_json::json!("critical_high")
        );
        assert_eq!(
            serde_json::from_value::<TestStatus>(serde_json::json!("critical_low")).unwrap(),
            TestStatus::CriticalLow
        );
        assert_eq!(
            serde_json::to_value(Gender::Female).unwrap(),
            serde_json::json!("female")
        );
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(TestStatus::from_str("borderline").is_err());
        assert!(Gender::from_str("").is_err());
    }

    #[test]
    fn unknown_counts_as_abnormal() {
        assert!(!TestStatus::Normal.is_abnormal());
        assert!(TestStatus::High.is_abnormal());
        assert!(TestStatus::CriticalLow.is_abnormal());
        assert!(TestStatus::Unknown.is_abnormal());
    }
}
