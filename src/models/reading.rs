use serde::{Deserialize, Serialize};

/// One extracted test value, exactly as the upstream extraction service
/// handed it over: name and unit unparsed, value already numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub test_name_raw: String,
    pub value: f64,
    pub unit_raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_deserializes_from_wire_fields() {
        let reading: RawReading = serde_json::from_str(
            r#"{"testNameRaw": "Hb", "value": 9.5, "unitRaw": "g/dL"}"#,
        )
        .unwrap();
        assert_eq!(reading.test_name_raw, "Hb");
        assert_eq!(reading.value, 9.5);
        assert_eq!(reading.unit_raw, "g/dL");
    }

    #[test]
    fn reading_serializes_with_wire_fields() {
        let reading = RawReading {
            test_name_raw: "glucose".into(),
            value: 450.0,
            unit_raw: "mg/dL".into(),
        };
        let value = serde_json::to_value(&reading).unwrap();
        assert!(value.get("testNameRaw").is_some());
        assert!(value.get("unitRaw").is_some());
        assert!(value.get("test_name_raw").is_none());
    }
}
