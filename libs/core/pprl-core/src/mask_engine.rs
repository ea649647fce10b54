// [libs/core/pprl-core/src/mask_engine.rs]
//! The mask engine: CLK, RBF and CLKRBF filter construction, salt
//! resolution, token insertion and hardener application.

use std::collections::HashMap;

use tracing::instrument;

use pprl_model::{
    AnyAttributeConfig, AttributeSalt, AttributeValueEntity, BitVectorEntity, CLKFilter,
    CLKRBFFilter, EntityMaskRequest, EntityMaskResponse, Filter, HashConfig, RBFFilter,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bits::{optimal_size, Bitset};
use crate::error::CoreError;
use crate::harden;
use crate::hash_chain;
use crate::strategy::bit_indices;
use crate::tokenize::{destructure_digest, tokenize};

fn resolve_salt(entity: &AttributeValueEntity, salt: Option<&AttributeSalt>) -> Result<String, CoreError> {
    let Some(salt) = salt else {
        return Ok(String::new());
    };
    if let Some(value) = &salt.value {
        return Ok(value.clone());
    }
    let attribute = salt
        .attribute
        .as_ref()
        .expect("AttributeSalt::validate guarantees exactly one of value/attribute is set");
    entity.attributes.get(attribute).cloned().ok_or_else(|| {
        CoreError::AttributeNotPresent {
            kind: "attribute salts",
            detail: format!(
                "`{attribute}` on entities with ID `{}`",
                entity.id
            ),
        }
    })
}

/// Tokenizes `value` and inserts each token's bits into `ba`, prefixing the
/// attribute name when configured and the resolved salt unconditionally.
#[allow(clippy::too_many_arguments)]
fn insert_attribute_tokens(
    ba: &mut Bitset,
    entity_id: &str,
    attribute_name: &str,
    value: &str,
    salt: &str,
    token_size: u32,
    padding: &str,
    prepend_attribute_name: bool,
    hash: &HashConfig,
    hash_values: u32,
) -> Result<(), CoreError> {
    let tokens = tokenize(value, token_size, padding);
    if tokens.is_empty() {
        return Err(CoreError::EmptyTokenSet {
            attribute: attribute_name.to_string(),
            entity_id: entity_id.to_string(),
        });
    }

    let filter_size = ba.len();
    for token in tokens {
        let prefixed = if prepend_attribute_name {
            format!("{attribute_name}{token}")
        } else {
            token
        };
        let keyed = format!("{salt}{prefixed}");
        let digest = hash_chain::digest(&hash.function, keyed.as_bytes())?;
        let destructured = destructure_digest(&digest);
        for idx in bit_indices(hash.strategy, destructured, hash_values, filter_size) {
            ba.set_bit(idx);
        }
    }
    Ok(())
}

fn sorted_attribute_names(attributes: &AnyAttributeConfig) -> Vec<String> {
    let mut names: Vec<String> = attributes.attribute_names().iter().map(|s| s.to_string()).collect();
    names.sort();
    names
}

fn mask_clk(request: &EntityMaskRequest, filter: &CLKFilter) -> Result<Vec<Bitset>, CoreError> {
    let mut out = Vec::with_capacity(request.entities.len());
    for entity in &request.entities {
        let mut ba = Bitset::new(filter.filter_size as usize);
        let mut names: Vec<&String> = entity.attributes.keys().collect();
        names.sort();
        for attribute_name in names {
            let value = &entity.attributes[attribute_name];
            let salt = resolve_salt(entity, request.attributes.salt_for(attribute_name))?;
            insert_attribute_tokens(
                &mut ba,
                &entity.id,
                attribute_name,
                value,
                &salt,
                request.config.token_size,
                &request.config.padding,
                request.config.prepend_attribute_name,
                &request.config.hash,
                filter.hash_values,
            )?;
        }
        out.push(ba);
    }
    Ok(out)
}

struct WeightedAttributes {
    names: Vec<String>,
    weight: HashMap<String, f64>,
    average_token_count: HashMap<String, f64>,
}

fn weighted_attributes(attributes: &AnyAttributeConfig) -> &[pprl_model::WeightedAttributeConfig] {
    match attributes {
        AnyAttributeConfig::Weighted(v) => v,
        AnyAttributeConfig::Static(_) => &[],
    }
}

fn collect_weighted(attributes: &AnyAttributeConfig) -> WeightedAttributes {
    let configs = weighted_attributes(attributes);
    let mut weight = HashMap::new();
    let mut average_token_count = HashMap::new();
    let mut names = Vec::new();
    for cfg in configs {
        weight.insert(cfg.attribute_name.clone(), cfg.weight);
        average_token_count.insert(cfg.attribute_name.clone(), cfg.average_token_count);
        names.push(cfg.attribute_name.clone());
    }
    names.sort();
    WeightedAttributes {
        names,
        weight,
        average_token_count,
    }
}

fn mask_clkrbf(request: &EntityMaskRequest, filter: &CLKRBFFilter) -> Result<Vec<Bitset>, CoreError> {
    let attrs = collect_weighted(&request.attributes);
    let min_weight = attrs
        .weight
        .values()
        .cloned()
        .fold(f64::INFINITY, f64::min);

    let mut hash_values_for: HashMap<String, u32> = HashMap::new();
    let mut total_expected_insertions = 0.0f64;
    for name in &attrs.names {
        let w = attrs.weight[name];
        let k = ((filter.hash_values as f64 * w / min_weight).ceil()) as u32;
        total_expected_insertions += k as f64 * attrs.average_token_count[name];
        hash_values_for.insert(name.clone(), k);
    }

    let filter_size = optimal_size(0.5, total_expected_insertions)?;

    let mut out = Vec::with_capacity(request.entities.len());
    for entity in &request.entities {
        let mut ba = Bitset::new(filter_size);
        for name in &attrs.names {
            let value = entity.attributes.get(name).ok_or_else(|| CoreError::AttributeNotPresent {
                kind: "attributes",
                detail: format!("`{name}` on entities with ID `{}`", entity.id),
            })?;
            let salt = resolve_salt(entity, request.attributes.salt_for(name))?;
            insert_attribute_tokens(
                &mut ba,
                &entity.id,
                name,
                value,
                &salt,
                request.config.token_size,
                &request.config.padding,
                request.config.prepend_attribute_name,
                &request.config.hash,
                hash_values_for[name],
            )?;
        }
        out.push(ba);
    }
    Ok(out)
}

fn mask_rbf(request: &EntityMaskRequest, filter: &RBFFilter) -> Result<Vec<Bitset>, CoreError> {
    let attrs = collect_weighted(&request.attributes);
    let total_weight: f64 = attrs.weight.values().sum();
    let k = filter.hash_values;

    let mut sub_size: HashMap<String, usize> = HashMap::new();
    for name in &attrs.names {
        let size = optimal_size(0.5, attrs.average_token_count[name] * k as f64)?;
        sub_size.insert(name.clone(), size);
    }

    let parent_size = attrs
        .names
        .iter()
        .map(|name| {
            let m = sub_size[name] as f64;
            let w = attrs.weight[name];
            (m * total_weight / w).ceil() as usize
        })
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(request.entities.len());
    for entity in &request.entities {
        let mut sub_bitsets: HashMap<String, Bitset> = HashMap::new();
        for name in &attrs.names {
            let m_a = sub_size[name];
            let mut sub = Bitset::new(m_a);
            let value = entity.attributes.get(name).ok_or_else(|| CoreError::AttributeNotPresent {
                kind: "attributes",
                detail: format!("`{name}` on entities with ID `{}`", entity.id),
            })?;
            let salt = resolve_salt(entity, request.attributes.salt_for(name))?;
            insert_attribute_tokens(
                &mut sub,
                &entity.id,
                name,
                value,
                &salt,
                request.config.token_size,
                &request.config.padding,
                request.config.prepend_attribute_name,
                &request.config.hash,
                k,
            )?;
            sub_bitsets.insert(name.clone(), sub);
        }

        let mut parent = Bitset::new(parent_size);
        let mut rng = StdRng::seed_from_u64(filter.seed as u64);
        let mut offset = 0usize;
        for name in &attrs.names {
            let weight = attrs.weight[name];
            let m_a = sub_size[name];
            let slice_len = ((weight / total_weight) * parent_size as f64).floor() as usize;
            let sub = &sub_bitsets[name];
            for _ in 0..slice_len {
                let idx = rng.gen_range(0..m_a.max(1));
                if sub.get(idx) {
                    parent.set(offset + idx, true);
                }
            }
            offset += slice_len;
        }
        out.push(parent);
    }
    Ok(out)
}

/// Runs the mask pipeline over every entity in `request`, applying the
/// configured filter and then the configured hardener chain.
///
/// Assumes [`EntityMaskRequest::validate_structure`] and the semantic
/// attribute-kind/presence checks (`crate::validate`) have already run.
#[instrument(skip(request), fields(entities = request.entities.len()))]
pub fn mask(request: &EntityMaskRequest) -> Result<EntityMaskResponse, CoreError> {
    let bitsets = match &request.config.filter {
        Filter::Clk(f) => mask_clk(request, f)?,
        Filter::Rbf(f) => mask_rbf(request, f)?,
        Filter::Clkrbf(f) => mask_clkrbf(request, f)?,
    };

    let entities = request
        .entities
        .iter()
        .zip(bitsets.iter())
        .map(|(entity, ba)| {
            let hardened = harden::apply_all(&request.config.hardeners, ba);
            BitVectorEntity {
                id: entity.id.clone(),
                value: hardened.to_base64(),
            }
        })
        .collect();

    Ok(EntityMaskResponse {
        config: request.config.clone(),
        entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprl_model::{
        AttributeValueEntity, HashAlgorithm, HashFunction, HashStrategy, MaskConfig,
        StaticAttributeConfig, WeightedAttributeConfig,
    };

    fn entity(id: &str, attrs: &[(&str, &str)]) -> AttributeValueEntity {
        AttributeValueEntity {
            id: id.to_string(),
            attributes: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    fn base_config(filter: Filter) -> MaskConfig {
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
            padding: "_".to_string(),
            hardeners: vec![],
        }
    }

    #[test]
    fn clk_masking_is_deterministic() {
        let request = EntityMaskRequest {
            config: base_config(Filter::Clk(CLKFilter {
                filter_size: 1024,
                hash_values: 5,
            })),
            attributes: AnyAttributeConfig::Static(vec![StaticAttributeConfig {
                attribute_name: "given_name".to_string(),
                salt: None,
            }]),
            entities: vec![entity("e1", &[("given_name", "anna")])],
        };

        let a = mask(&request).unwrap();
        let b = mask(&request).unwrap();
        assert_eq!(a.entities[0].value, b.entities[0].value);
    }

    #[test]
    fn clk_empty_value_with_no_padding_fails() {
        let mut config = base_config(Filter::Clk(CLKFilter {
            filter_size: 512,
            hash_values: 5,
        }));
        config.padding = String::new();
        let request = EntityMaskRequest {
            config,
            attributes: AnyAttributeConfig::default(),
            entities: vec![entity("e1", &[("gender", "")])],
        };

        let err = mask(&request).unwrap_err();
        assert_eq!(
            err,
            CoreError::EmptyTokenSet {
                attribute: "gender".to_string(),
                entity_id: "e1".to_string(),
            }
        );
    }

    fn weighted_request(filter: Filter) -> EntityMaskRequest {
        EntityMaskRequest {
            config: base_config(filter),
            attributes: AnyAttributeConfig::Weighted(vec![
                WeightedAttributeConfig {
                    attribute_name: "given_name".to_string(),
                    salt: None,
                    weight: 1.0,
                    average_token_count: 5.0,
                },
                WeightedAttributeConfig {
                    attribute_name: "last_name".to_string(),
                    salt: None,
                    weight: 2.0,
                    average_token_count: 6.0,
                },
            ]),
            entities: vec![entity(
                "e1",
                &[("given_name", "anna"), ("last_name", "schmidt")],
            )],
        }
    }

    #[test]
    fn rbf_attribute_order_does_not_change_output() {
        let request = weighted_request(Filter::Rbf(RBFFilter {
            hash_values: 5,
            seed: 727,
        }));
        let reordered = EntityMaskRequest {
            attributes: AnyAttributeConfig::Weighted(
                match &request.attributes {
                    AnyAttributeConfig::Weighted(v) => {
                        let mut v = v.clone();
                        v.reverse();
                        v
                    }
                    _ => unreachable!(),
                },
            ),
            ..request.clone()
        };

        let a = mask(&request).unwrap();
        let b = mask(&reordered).unwrap();
        assert_eq!(a.entities[0].value, b.entities[0].value);
    }

    #[test]
    fn clkrbf_masking_runs_to_completion() {
        let request = weighted_request(Filter::Clkrbf(CLKRBFFilter { hash_values: 5 }));
        let response = mask(&request).unwrap();
        assert_eq!(response.entities.len(), 1);
    }
}
