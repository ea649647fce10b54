// [libs/core/pprl-core/src/hash_chain.rs]
//! Compose an ordered list of hash algorithms, optionally keyed, into a
//! single digest function.

use crate::error::CoreError;
use hmac::{Hmac, Mac};
use md5::Md5;
use pprl_model::{HashAlgorithm, HashFunction};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

fn plain_digest(algorithm: HashAlgorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Md5 => Md5::digest(input).to_vec(),
        HashAlgorithm::Sha1 => Sha1::digest(input).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(input).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(input).to_vec(),
    }
}

fn hmac_digest(algorithm: HashAlgorithm, key: &[u8], input: &[u8]) -> Result<Vec<u8>, CoreError> {
    fn run<D: hmac::digest::Update + hmac::digest::FixedOutput + hmac::digest::KeyInit + Clone>(
        key: &[u8],
        input: &[u8],
    ) -> Vec<u8> {
        let mut mac = Hmac::<D>::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }

    Ok(match algorithm {
        HashAlgorithm::Md5 => run::<Md5>(key, input),
        HashAlgorithm::Sha1 => run::<Sha1>(key, input),
        HashAlgorithm::Sha256 => run::<Sha256>(key, input),
        HashAlgorithm::Sha512 => run::<Sha512>(key, input),
    })
}

/// Runs `input` through every algorithm in `function.algorithms`, in order,
/// each stage's output feeding the next stage's input. If `function.key` is
/// set, every stage is an HMAC under that key; otherwise every stage is a
/// plain digest.
///
/// Assumes `function.algorithms` is non-empty — a structural precondition
/// enforced by [`pprl_model::HashFunction::validate`] before this is called.
pub fn digest(function: &HashFunction, input: &[u8]) -> Result<Vec<u8>, CoreError> {
    let mut current = input.to_vec();
    for algorithm in &function.algorithms {
        current = match &function.key {
            Some(key) => hmac_digest(*algorithm, key.as_bytes(), &current)?,
            None => plain_digest(*algorithm, &current),
        };
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprl_model::HashAlgorithm;

    fn function(algorithms: Vec<HashAlgorithm>, key: Option<&str>) -> HashFunction {
        HashFunction {
            algorithms,
            key: key.map(String::from),
        }
    }

    #[test]
    fn single_stage_plain_digest_has_expected_length() {
        let f = function(vec![HashAlgorithm::Sha256], None);
        let out = digest(&f, b"hello").unwrap();
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn chained_digest_differs_from_single_stage() {
        let single = function(vec![HashAlgorithm::Sha256], None);
        let chained = function(vec![HashAlgorithm::Sha256, HashAlgorithm::Md5], None);
        let a = digest(&single, b"hello").unwrap();
        let b = digest(&chained, b"hello").unwrap();
        assert_ne!(a, b);
        assert_eq!(b.len(), 16);
    }

    #[test]
    fn keyed_digest_differs_from_plain() {
        let plain = function(vec![HashAlgorithm::Sha1], None);
        let keyed = function(vec![HashAlgorithm::Sha1], Some("k"));
        let a = digest(&plain, b"hello").unwrap();
        let b = digest(&keyed, b"hello").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn same_input_and_config_are_deterministic() {
        let f = function(vec![HashAlgorithm::Sha512, HashAlgorithm::Sha1], Some("salt"));
        let a = digest(&f, b"record").unwrap();
        let b = digest(&f, b"record").unwrap();
        assert_eq!(a, b);
    }
}
