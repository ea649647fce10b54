// [libs/core/pprl-core/src/validate.rs]
//! Semantic (400-class) preconditions that can only be checked once
//! entities are in hand: filter-type-vs-attribute-kind compatibility, and
//! attribute/salt presence across every entity. Structural (422-class)
//! preconditions live as `validate()`/`validate_structure()` methods on the
//! `pprl-model` types themselves.

use indexmap::IndexMap;

use pprl_model::{AnyAttributeConfig, EntityMaskRequest, Filter};

use crate::error::CoreError;

fn attribute_kind_error(filter: &Filter, found: &'static str) -> CoreError {
    let required = match filter {
        Filter::Clk(_) => "static",
        Filter::Rbf(_) | Filter::Clkrbf(_) => "weighted",
    };
    CoreError::AttributeKindMismatch {
        filter_type: filter.type_name(),
        required,
        found,
    }
}

fn check_attribute_kind(request: &EntityMaskRequest) -> Result<(), CoreError> {
    match (&request.config.filter, &request.attributes) {
        (Filter::Clk(_), AnyAttributeConfig::Static(_)) => Ok(()),
        (Filter::Clk(_), AnyAttributeConfig::Weighted(_)) => {
            Err(attribute_kind_error(&request.config.filter, "weighted ones were found"))
        }
        (Filter::Rbf(_) | Filter::Clkrbf(_), AnyAttributeConfig::Weighted(v)) if !v.is_empty() => Ok(()),
        (Filter::Rbf(_) | Filter::Clkrbf(_), AnyAttributeConfig::Weighted(_)) => {
            Err(attribute_kind_error(&request.config.filter, "none were found"))
        }
        (Filter::Rbf(_) | Filter::Clkrbf(_), AnyAttributeConfig::Static(v)) => Err(attribute_kind_error(
            &request.config.filter,
            if v.is_empty() { "none were found" } else { "static ones were found" },
        )),
    }
}

fn format_offenders(offenders: &IndexMap<String, Vec<String>>) -> String {
    offenders
        .iter()
        .map(|(name, ids)| {
            let id_list = ids.iter().map(|id| format!("`{id}`")).collect::<Vec<_>>().join(", ");
            format!("`{name}` on entities with ID {id_list}")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_attribute_presence(request: &EntityMaskRequest) -> Result<(), CoreError> {
    let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();
    for name in request.attributes.attribute_names() {
        for entity in &request.entities {
            if !entity.attributes.contains_key(name) {
                missing.entry(name.to_string()).or_default().push(entity.id.clone());
            }
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::AttributeNotPresent {
            kind: "attributes",
            detail: format_offenders(&missing),
        })
    }
}

fn check_salt_attribute_presence(request: &EntityMaskRequest) -> Result<(), CoreError> {
    let mut missing: IndexMap<String, Vec<String>> = IndexMap::new();
    let salted_attributes: Vec<(&str, &str)> = request
        .attributes
        .attribute_names()
        .into_iter()
        .filter_map(|name| {
            request
                .attributes
                .salt_for(name)
                .and_then(|salt| salt.attribute.as_deref())
                .map(|salt_attr| (name, salt_attr))
        })
        .collect();

    for (_, salt_attr) in salted_attributes {
        for entity in &request.entities {
            if !entity.attributes.contains_key(salt_attr) {
                missing
                    .entry(salt_attr.to_string())
                    .or_default()
                    .push(entity.id.clone());
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::AttributeNotPresent {
            kind: "attribute salts",
            detail: format_offenders(&missing),
        })
    }
}

/// Runs every semantic precondition required before a mask request may be
/// handed to [`crate::mask_engine::mask`].
pub fn validate_mask_request(request: &EntityMaskRequest) -> Result<(), CoreError> {
    check_attribute_kind(request)?;
    check_attribute_presence(request)?;
    check_salt_attribute_presence(request)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprl_model::{
        AttributeSalt, AttributeValueEntity, CLKFilter, HashAlgorithm, HashConfig, HashFunction,
        HashStrategy, MaskConfig, RBFFilter, StaticAttributeConfig, WeightedAttributeConfig,
    };

    fn config(filter: Filter) -> MaskConfig {
        MaskConfig {
            token_size: 2,
            hash: HashConfig {
                function: HashFunction {
                    algorithms: vec![HashAlgorithm::Sha256],
                    key: None,
                },
                strategy: HashStrategy::DoubleHash,
            },
            prepend_attribute_name: true,
            filter,
            padding: String::new(),
            hardeners: vec![],
        }
    }

    fn entity(id: &str, attrs: &[(&str, &str)]) -> AttributeValueEntity {
        AttributeValueEntity {
            id: id.to_string(),
            attributes: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn clk_rejects_weighted_attributes() {
        let request = EntityMaskRequest {
            config: config(Filter::Clk(CLKFilter {
                filter_size: 64,
                hash_values: 3,
            })),
            attributes: AnyAttributeConfig::Weighted(vec![WeightedAttributeConfig {
                attribute_name: "given_name".to_string(),
                salt: None,
                weight: 1.0,
                average_token_count: 5.0,
            }]),
            entities: vec![entity("e1", &[("given_name", "anna")])],
        };

        assert!(matches!(
            validate_mask_request(&request),
            Err(CoreError::AttributeKindMismatch { filter_type: "clk", required: "static", .. })
        ));
    }

    #[test]
    fn rbf_rejects_empty_weighted_list() {
        let request = EntityMaskRequest {
            config: config(Filter::Rbf(RBFFilter {
                hash_values: 3,
                seed: 1,
            })),
            attributes: AnyAttributeConfig::default(),
            entities: vec![entity("e1", &[])],
        };

        assert!(matches!(
            validate_mask_request(&request),
            Err(CoreError::AttributeKindMismatch { filter_type: "rbf", required: "weighted", .. })
        ));
    }

    #[test]
    fn missing_attribute_enumerates_every_offending_entity() {
        let request = EntityMaskRequest {
            config: config(Filter::Clk(CLKFilter {
                filter_size: 64,
                hash_values: 3,
            })),
            attributes: AnyAttributeConfig::Static(vec![StaticAttributeConfig {
                attribute_name: "given_name".to_string(),
                salt: None,
            }]),
            entities: vec![entity("e1", &[]), entity("e2", &[("given_name", "x")])],
        };

        let err = validate_mask_request(&request).unwrap_err();
        match err {
            CoreError::AttributeNotPresent { kind: "attributes", detail } => {
                assert!(detail.contains("given_name"));
                assert!(detail.contains("e1"));
                assert!(!detail.contains("e2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_salt_attribute_is_reported() {
        let request = EntityMaskRequest {
            config: config(Filter::Clk(CLKFilter {
                filter_size: 64,
                hash_values: 3,
            })),
            attributes: AnyAttributeConfig::Static(vec![StaticAttributeConfig {
                attribute_name: "given_name".to_string(),
                salt: Some(AttributeSalt {
                    value: None,
                    attribute: Some("birth_date".to_string()),
                }),
            }]),
            entities: vec![entity("e1", &[("given_name", "anna")])],
        };

        let err = validate_mask_request(&request).unwrap_err();
        match err {
            CoreError::AttributeNotPresent { kind: "attribute salts", detail } => {
                assert!(detail.contains("birth_date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn well_formed_request_passes() {
        let request = EntityMaskRequest {
            config: config(Filter::Clk(CLKFilter {
                filter_size: 64,
                hash_values: 3,
            })),
            attributes: AnyAttributeConfig::Static(vec![StaticAttributeConfig {
                attribute_name: "given_name".to_string(),
                salt: None,
            }]),
            entities: vec![entity("e1", &[("given_name", "anna")])],
        };

        assert!(validate_mask_request(&request).is_ok());
    }
}
