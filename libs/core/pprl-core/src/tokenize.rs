// [libs/core/pprl-core/src/tokenize.rs]
//! q-gram tokenization and digest destructuring.

use std::collections::HashSet;

/// Splits `pad^(q-1) + value + pad^(q-1)` into the set of its distinct
/// length-`q` substrings, where `pad^(q-1)` means `pad` repeated `q-1`
/// times. Substrings are taken over Unicode scalar values, not bytes.
///
/// An empty `value` with an empty `pad` yields the empty set: the padded
/// string is empty, and an empty string has no length-`q` substring.
pub fn tokenize(value: &str, q: u32, pad: &str) -> HashSet<String> {
    let q = q as usize;
    let fence = pad.repeat(q.saturating_sub(1));
    let padded: Vec<char> = fence
        .chars()
        .chain(value.chars())
        .chain(fence.chars())
        .collect();

    if padded.len() < q {
        return HashSet::new();
    }

    (0..=padded.len() - q)
        .map(|i| padded[i..i + q].iter().collect::<String>())
        .collect()
}

/// Reads bytes `0..16` of `digest` as four little-endian signed 32-bit
/// integers `(i0, i1, i2, i3)`.
///
/// # Panics
/// Panics if `digest` is shorter than 16 bytes — every supported hash
/// algorithm (md5=16, sha1=20, sha256=32, sha512=64) produces a digest at
/// least this long, so this can only happen on an internal bug.
pub fn destructure_digest(digest: &[u8]) -> (i32, i32, i32, i32) {
    let i0 = i32::from_le_bytes(digest[0..4].try_into().unwrap());
    let i1 = i32::from_le_bytes(digest[4..8].try_into().unwrap());
    let i2 = i32::from_le_bytes(digest[8..12].try_into().unwrap());
    let i3 = i32::from_le_bytes(digest[12..16].try_into().unwrap());
    (i0, i1, i2, i3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_foobar_matches_canonical_example() {
        let tokens = tokenize("foobar", 2, "_");
        let expected: HashSet<String> = ["_f", "fo", "oo", "ob", "ba", "ar", "r_"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn tokenize_empty_value_empty_pad_is_empty_set() {
        assert!(tokenize("", 2, "").is_empty());
    }

    #[test]
    fn tokenize_deduplicates_repeated_substrings() {
        let tokens = tokenize("aaaa", 2, "");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains("aa"));
    }

    #[test]
    fn tokenize_independent_of_pad_choice_when_pad_absent_from_value() {
        let a = tokenize("hello", 3, "_");
        let b = tokenize("hello", 3, "#");
        assert_eq!(a, b);
    }

    #[test]
    fn destructure_digest_matches_canonical_example() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x01; 4]);
        bytes.extend_from_slice(&[0x23; 4]);
        bytes.extend_from_slice(&[0x45; 4]);
        bytes.extend_from_slice(&[0x67; 4]);
        let (i0, i1, i2, i3) = destructure_digest(&bytes);
        assert_eq!(i0, 0x01010101);
        assert_eq!(i1, 0x23232323);
        assert_eq!(i2, 0x45454545);
        assert_eq!(i3, 0x67676767);
    }
}
