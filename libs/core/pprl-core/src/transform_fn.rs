// [libs/core/pprl-core/src/transform_fn.rs]
//! String transforms: the per-stage logic invoked by the transform
//! engine (`transform_engine.rs`) for each configured [`Transformer`].

use deunicode::deunicode;
use indexmap::IndexMap;
use pprl_model::{PhoneticCodeAlgorithm, Transformer};
use unicode_normalization::UnicodeNormalization;

use crate::phonetics;

/// A stage-level failure: either a value the stage could not process, or a
/// configured element (phonetic algorithm, ...) this deployment has no
/// implementation for.
pub enum StageError {
    /// Per-value failure; becomes `entity with ID <id> could not be
    /// processed: <message>` once the engine attaches the entity ID.
    Value(String),
    /// The caller configured an unimplemented element.
    Capability {
        /// What kind of element (e.g. `"phonetic algorithm"`).
        kind: &'static str,
        /// The requested, unsupported name.
        name: String,
    },
}

fn default_punctuation() -> &'static str {
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"
}

fn collapse_whitespace_runs(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i - start >= 2 {
                out.push(' ');
            } else {
                out.push(chars[start]);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn normalize(value: &str) -> String {
    let ascii = deunicode(value);
    let nfkd: String = ascii.nfkd().collect();
    let ascii_only: String = nfkd.chars().filter(|c| c.is_ascii()).collect();
    let lowered = ascii_only.to_lowercase();
    collapse_whitespace_runs(&lowered).trim().to_string()
}

fn character_filter(value: &str, characters: Option<&str>) -> String {
    let drop = characters.unwrap_or_else(default_punctuation);
    value.chars().filter(|c| !drop.contains(*c)).collect()
}

fn number(value: &str, decimal_places: u32) -> Result<String, StageError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| StageError::Value(format!("value `{value}` could not be parsed as a number")))?;
    Ok(format!("{:.*}", decimal_places as usize, parsed))
}

fn date_time(value: &str, input_format: &str, output_format: &str) -> Result<String, StageError> {
    let parsed = chrono::NaiveDateTime::parse_from_str(value, input_format)
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(value, input_format)
                .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
        })
        .map_err(|_| {
            StageError::Value(format!(
                "value `{value}` does not match date-time format `{input_format}`"
            ))
        })?;
    Ok(parsed.format(output_format).to_string())
}

fn mapping(
    value: &str,
    table: &IndexMap<String, String>,
    default_value: Option<&str>,
    inline: bool,
) -> Result<String, StageError> {
    if !inline {
        return table
            .get(value)
            .cloned()
            .or_else(|| default_value.map(String::from))
            .ok_or_else(|| {
                StageError::Value(format!(
                    "value `{value}` has no mapping, or no default value is present"
                ))
            });
    }

    fn ranges_overlap(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
        a_start < b_end && b_start < a_end
    }

    let mut accepted: Vec<(usize, usize, String)> = Vec::new();
    for (key, replacement) in table {
        if key.is_empty() {
            continue;
        }
        for (start, matched) in value.match_indices(key.as_str()) {
            let end = start + matched.len();
            if accepted
                .iter()
                .any(|(a_start, a_end, _)| ranges_overlap(start, end, *a_start, *a_end))
            {
                return Err(StageError::Value(format!(
                    "cannot resolve inline mapping: replacement of `{key}` with `{replacement}` at index {start} overlaps"
                )));
            }
            accepted.push((start, end, replacement.clone()));
        }
    }
    accepted.sort_by_key(|(start, _, _)| *start);

    let mut result = String::new();
    let mut cursor = 0;
    for (start, end, replacement) in accepted {
        result.push_str(&value[cursor..start]);
        result.push_str(&replacement);
        cursor = end;
    }
    result.push_str(&value[cursor..]);
    Ok(result)
}

fn phonetic_code(value: &str, algorithm: PhoneticCodeAlgorithm) -> Result<String, StageError> {
    match algorithm {
        PhoneticCodeAlgorithm::Soundex => Ok(phonetics::soundex(value)),
        PhoneticCodeAlgorithm::Cologne => Ok(phonetics::cologne(value)),
        PhoneticCodeAlgorithm::Metaphone => Err(StageError::Capability {
            kind: "phonetic algorithm",
            name: "metaphone".to_string(),
        }),
        PhoneticCodeAlgorithm::RefinedSoundex => Err(StageError::Capability {
            kind: "phonetic algorithm",
            name: "refined_soundex".to_string(),
        }),
        PhoneticCodeAlgorithm::FuzzySoundex => Err(StageError::Capability {
            kind: "phonetic algorithm",
            name: "fuzzy_soundex".to_string(),
        }),
    }
}

/// Applies one configured transformer stage to `value`.
pub fn apply(transformer: &Transformer, value: &str) -> Result<String, StageError> {
    match transformer {
        Transformer::Normalization => Ok(normalize(value)),
        Transformer::DateTime {
            input_format,
            output_format,
        } => date_time(value, input_format, output_format),
        Transformer::CharacterFilter { characters } => {
            Ok(character_filter(value, characters.as_deref()))
        }
        Transformer::Mapping {
            mapping: table,
            default_value,
            inline,
        } => mapping(value, table, default_value.as_deref(), *inline),
        Transformer::Number { decimal_places } => number(value, *decimal_places),
        Transformer::PhoneticCode { algorithm } => phonetic_code(value, *algorithm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_transliterates_lowercases_and_trims() {
        assert_eq!(normalize("  Müller  GmbH  "), "muller gmbh");
    }

    #[test]
    fn character_filter_defaults_to_ascii_punctuation() {
        assert_eq!(character_filter("a.b,c!", None), "abc");
    }

    #[test]
    fn character_filter_uses_custom_set() {
        assert_eq!(character_filter("a-b_c", Some("-_")), "abc");
    }

    #[test]
    fn number_formats_with_fixed_decimal_places() {
        assert_eq!(number("3.14159", 2).unwrap(), "3.14");
        assert_eq!(number("7", 3).unwrap(), "7.000");
    }

    #[test]
    fn number_rejects_unparseable_input() {
        assert!(matches!(number("not-a-number", 2), Err(StageError::Value(_))));
    }

    #[test]
    fn date_time_reformats_between_patterns() {
        let out = date_time("2020-01-15", "%Y-%m-%d", "%d/%m/%Y").unwrap();
        assert_eq!(out, "15/01/2020");
    }

    #[test]
    fn mapping_whole_string_replacement() {
        let mut table = IndexMap::new();
        table.insert("m".to_string(), "male".to_string());
        assert_eq!(mapping("m", &table, None, false).unwrap(), "male");
    }

    #[test]
    fn mapping_whole_string_falls_back_to_default() {
        let table: IndexMap<String, String> = IndexMap::new();
        assert_eq!(mapping("x", &table, Some("unknown"), false).unwrap(), "unknown");
    }

    #[test]
    fn mapping_inline_collision_matches_canonical_message() {
        let mut table = IndexMap::new();
        table.insert("ob".to_string(), "x".to_string());
        table.insert("ba".to_string(), "y".to_string());
        let err = mapping("foobar", &table, None, true).unwrap_err();
        match err {
            StageError::Value(msg) => assert_eq!(
                msg,
                "cannot resolve inline mapping: replacement of `ba` with `y` at index 3 overlaps"
            ),
            _ => panic!("expected a value error"),
        }
    }

    #[test]
    fn mapping_inline_splices_non_overlapping_occurrences() {
        let mut table = IndexMap::new();
        table.insert("foo".to_string(), "X".to_string());
        table.insert("bar".to_string(), "Y".to_string());
        assert_eq!(mapping("foobar", &table, None, true).unwrap(), "XY");
    }

    #[test]
    fn phonetic_code_declines_unimplemented_algorithms() {
        assert!(matches!(
            phonetic_code("x", PhoneticCodeAlgorithm::Metaphone),
            Err(StageError::Capability { .. })
        ));
    }
}
