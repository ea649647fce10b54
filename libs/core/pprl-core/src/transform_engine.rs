// [libs/core/pprl-core/src/transform_engine.rs]
//! The transform engine: runs global-before, attribute-specific, and
//! global-after transformer chains over every attribute of every entity.

use tracing::instrument;

use pprl_model::{
    AttributeTransformerConfig, AttributeValueEntity, EmptyValueHandling, EntityTransformRequest,
    EntityTransformResponse, GlobalTransformerConfig, Transformer,
};

use crate::error::CoreError;
use crate::transform_fn::{self, StageError};

fn apply_stage(
    entity_id: &str,
    transformer: &Transformer,
    value: String,
    empty_value: EmptyValueHandling,
) -> Result<String, CoreError> {
    if value.is_empty() {
        match empty_value {
            EmptyValueHandling::Error => {
                return Err(CoreError::EmptyField(entity_id.to_string()));
            }
            EmptyValueHandling::Skip => {
                return Ok(value);
            }
            EmptyValueHandling::Ignore => {}
        }
    }

    transform_fn::apply(transformer, &value).map_err(|e| match e {
        StageError::Value(message) => CoreError::ValueError {
            entity_id: entity_id.to_string(),
            message,
        },
        StageError::Capability { kind, name } => CoreError::Unimplemented { kind, name },
    })
}

fn run_chain(
    entity_id: &str,
    chain: &[Transformer],
    mut value: String,
    empty_value: EmptyValueHandling,
) -> Result<String, CoreError> {
    for transformer in chain {
        value = apply_stage(entity_id, transformer, value, empty_value)?;
    }
    Ok(value)
}

fn attribute_chain_for<'a>(
    attribute_transformers: &'a [AttributeTransformerConfig],
    attribute_name: &str,
) -> Option<&'a [Transformer]> {
    attribute_transformers
        .iter()
        .find(|cfg| cfg.attribute_name == attribute_name)
        .map(|cfg| cfg.transformers.as_slice())
}

fn transform_entity(
    entity: &AttributeValueEntity,
    attribute_transformers: &[AttributeTransformerConfig],
    globals: &GlobalTransformerConfig,
    empty_value: EmptyValueHandling,
) -> Result<AttributeValueEntity, CoreError> {
    let mut attributes = entity.attributes.clone();
    for (name, value) in attributes.iter_mut() {
        let mut current = std::mem::take(value);
        current = run_chain(&entity.id, &globals.before, current, empty_value)?;
        if let Some(chain) = attribute_chain_for(attribute_transformers, name) {
            current = run_chain(&entity.id, chain, current, empty_value)?;
        }
        current = run_chain(&entity.id, &globals.after, current, empty_value)?;
        *value = current;
    }
    Ok(AttributeValueEntity {
        id: entity.id.clone(),
        attributes,
    })
}

/// Runs the transform pipeline over every entity in `request`.
///
/// Assumes [`EntityTransformRequest::validate_structure`] has already been
/// called: non-empty entity list, at least one transformer configured.
#[instrument(skip(request), fields(entities = request.entities.len()))]
pub fn transform(request: &EntityTransformRequest) -> Result<EntityTransformResponse, CoreError> {
    let mut entities = Vec::with_capacity(request.entities.len());
    for entity in &request.entities {
        entities.push(transform_entity(
            entity,
            &request.attribute_transformers,
            &request.global_transformers,
            request.config.empty_value,
        )?);
    }
    Ok(EntityTransformResponse {
        config: request.config,
        entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprl_model::TransformConfig;

    fn entity(id: &str, attrs: &[(&str, &str)]) -> AttributeValueEntity {
        AttributeValueEntity {
            id: id.to_string(),
            attributes: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn applies_global_before_attribute_specific_and_global_after_in_order() {
        let request = EntityTransformRequest {
            config: TransformConfig {
                empty_value: EmptyValueHandling::Ignore,
            },
            attribute_transformers: vec![AttributeTransformerConfig {
                attribute_name: "given_name".to_string(),
                transformers: vec![Transformer::CharacterFilter {
                    characters: Some(" ".to_string()),
                }],
            }],
            global_transformers: GlobalTransformerConfig {
                before: vec![Transformer::Normalization],
                after: vec![],
            },
            entities: vec![entity("e1", &[("given_name", " ANNA LENA ")])],
        };

        let response = transform(&request).unwrap();
        assert_eq!(
            response.entities[0].attributes.get("given_name").unwrap(),
            "annalena"
        );
    }

    #[test]
    fn error_policy_fails_on_empty_attribute_value() {
        let request = EntityTransformRequest {
            config: TransformConfig {
                empty_value: EmptyValueHandling::Error,
            },
            attribute_transformers: vec![],
            global_transformers: GlobalTransformerConfig {
                before: vec![Transformer::Normalization],
                after: vec![],
            },
            entities: vec![entity("e1", &[("given_name", "")])],
        };

        let err = transform(&request).unwrap_err();
        assert_eq!(err, CoreError::EmptyField("e1".to_string()));
    }

    #[test]
    fn skip_policy_leaves_empty_value_untouched() {
        let request = EntityTransformRequest {
            config: TransformConfig {
                empty_value: EmptyValueHandling::Skip,
            },
            attribute_transformers: vec![],
            global_transformers: GlobalTransformerConfig {
                before: vec![Transformer::Normalization],
                after: vec![],
            },
            entities: vec![entity("e1", &[("given_name", "")])],
        };

        let response = transform(&request).unwrap();
        assert_eq!(response.entities[0].attributes.get("given_name").unwrap(), "");
    }
}
