// [libs/domain/pprl-model/src/common.rs]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An entity carrying one string value per attribute name, keyed by an
/// opaque identifier. Consumed by the transform engine (input/output) and
/// by the mask engine (input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValueEntity {
    /// Caller-supplied identifier, echoed back unchanged in every response.
    pub id: String,
    /// Attribute name to string value. Unordered externally.
    pub attributes: HashMap<String, String>,
}

/// An entity whose value is a base64-encoded, little-endian packed bit
/// vector of fixed length within one request. Produced by the mask engine,
/// consumed by the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitVectorEntity {
    /// Caller-supplied identifier, echoed back unchanged in every response.
    pub id: String,
    /// Base64-encoded packed bitset.
    pub value: String,
}

/// Trivial liveness response for the `/healthz` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the service can answer at all.
    pub status: HealthStatus,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: HealthStatus::Ok,
        }
    }
}

/// Closed set of health statuses. Only `Ok` exists today, but keeping it a
/// tagged variant (rather than a bare string) means an unhealthy state can
/// be added without breaking the wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The service is up and able to serve requests.
    Ok,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes_to_contract_shape() {
        let json = serde_json::to_value(HealthResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[test]
    fn attribute_value_entity_round_trips() {
        let mut attributes = HashMap::new();
        attributes.insert("given_name".to_string(), "jane".to_string());

        let entity = AttributeValueEntity {
            id: "1".to_string(),
            attributes,
        };

        let json = serde_json::to_string(&entity).unwrap();
        let back: AttributeValueEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }

    #[test]
    fn bit_vector_entity_round_trips() {
        let entity = BitVectorEntity {
            id: "1".to_string(),
            value: "AAAA".to_string(),
        };

        let json = serde_json::to_string(&entity).unwrap();
        let back: BitVectorEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }
}
