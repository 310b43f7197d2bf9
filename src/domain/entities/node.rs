use serde::{Deserialize, Serialize};

/// One node's observed state as returned by the status API.
///
/// Produced fresh on every fetch; never mutated after construction. Only
/// `temp_rating` is under drift detection, the remaining fields are carried
/// for channel formatting and diagnostics. Every field except the identity
/// triple is `#[serde(default)]` so partial payloads still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Stable node identifier (BLS public key).
    pub bls: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Floating-point reputation score, the monitored quantity.
    #[serde(default)]
    pub temp_rating: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub online: bool,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_api_payload() {
        let json = r#"{
            "bls": "abcd1234",
            "name": "my-node-0",
            "tempRating": 99.87,
            "rating": 100.0,
            "status": "eligible",
            "online": true
        }"#;
        let node: NodeSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(node.bls, "abcd1234");
        assert_eq!(node.name, "my-node-0");
        assert!((node.temp_rating - 99.87).abs() < f64::EPSILON);
        assert!(node.online);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"bls": "abcd"}"#;
        let node: NodeSnapshot = serde_json::from_str(json).expect("deserialize");
        assert_eq!(node.name, "");
        assert_eq!(node.temp_rating, 0.0);
        assert!(node.status.is_none());
        assert!(!node.online);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"bls": "abcd", "tempRating": 42.0, "shard": 1, "owner": "erd1..."}"#;
        let node: NodeSnapshot = serde_json::from_str(json).expect("deserialize");
        assert!((node.temp_rating - 42.0).abs() < f64::EPSILON);
    }
}
