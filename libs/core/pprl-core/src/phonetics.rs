// [libs/core/pprl-core/src/phonetics.rs]
//! Fully-implemented phonetic-code algorithms: classic American Soundex and
//! Kölner Phonetik (Cologne phonetics), tailored for German.
//!
//! The remaining locale-specific variants named by `PhoneticCodeAlgorithm`
//! (Metaphone, Refined Soundex, Fuzzy Soundex) are accepted at the schema
//! level but have no implementation here — dispatch for those raises a
//! capability error rather than risk a subtly wrong reimplementation.

/// Classic American Soundex: one letter followed by three digits.
pub fn soundex(value: &str) -> String {
    let letters: Vec<char> = value
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let Some(&first) = letters.first() else {
        return String::new();
    };

    fn code(c: char) -> Option<u8> {
        match c {
            'B' | 'F' | 'P' | 'V' => Some(1),
            'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some(2),
            'D' | 'T' => Some(3),
            'L' => Some(4),
            'M' | 'N' => Some(5),
            'R' => Some(6),
            _ => None,
        }
    }

    let mut out = String::new();
    out.push(first);
    let mut last_code = code(first);

    for &c in &letters[1..] {
        if out.len() == 4 {
            break;
        }
        if c == 'H' || c == 'W' {
            // transparent: neither coded nor a separator
            continue;
        }
        let cur = code(c);
        if let Some(d) = cur {
            if cur != last_code {
                out.push((b'0' + d) as char);
            }
        }
        last_code = cur;
    }

    while out.len() < 4 {
        out.push('0');
    }
    out
}

fn cologne_code(letters: &[char], idx: usize) -> Vec<u8> {
    let c = letters[idx];
    let prev = if idx > 0 { Some(letters[idx - 1]) } else { None };
    let next = letters.get(idx + 1).copied();

    match c {
        'A' | 'E' | 'I' | 'J' | 'O' | 'U' | 'Y' | 'Ä' | 'Ö' | 'Ü' => vec![0],
        'H' => vec![],
        'B' => vec![1],
        'P' => {
            if next == Some('H') {
                vec![3]
            } else {
                vec![1]
            }
        }
        'D' | 'T' => {
            if matches!(next, Some('C') | Some('S') | Some('Z')) {
                vec![8]
            } else {
                vec![2]
            }
        }
        'F' | 'V' | 'W' => vec![3],
        'G' | 'K' | 'Q' => vec![4],
        'X' => {
            if matches!(prev, Some('C') | Some('K') | Some('Q')) {
                vec![8]
            } else {
                vec![4, 8]
            }
        }
        'L' => vec![5],
        'M' | 'N' => vec![6],
        'R' => vec![7],
        'S' | 'Z' | 'ß' => vec![8],
        'C' => {
            let front_vowel_follows = matches!(
                next,
                Some('A') | Some('H') | Some('K') | Some('O') | Some('Q') | Some('U') | Some('X')
            );
            if prev.is_none() {
                if matches!(
                    next,
                    Some('A') | Some('H') | Some('K') | Some('L') | Some('O') | Some('Q')
                        | Some('R') | Some('U') | Some('X')
                ) {
                    vec![4]
                } else {
                    vec![8]
                }
            } else if matches!(prev, Some('S') | Some('Z')) {
                vec![8]
            } else if front_vowel_follows {
                vec![4]
            } else {
                vec![8]
            }
        }
        _ => vec![],
    }
}

/// Kölner Phonetik (Cologne phonetics).
pub fn cologne(value: &str) -> String {
    let letters: Vec<char> = deunicode::deunicode(value)
        .chars()
        .flat_map(|c| c.to_uppercase())
        .filter(|c| c.is_alphabetic())
        .collect();

    let mut raw = Vec::new();
    for idx in 0..letters.len() {
        raw.extend(cologne_code(&letters, idx));
    }

    let mut collapsed: Vec<u8> = Vec::new();
    for d in raw {
        if collapsed.last() != Some(&d) {
            collapsed.push(d);
        }
    }

    // The leading digit is kept even when it is `0` (an initial vowel);
    // `0` is only a separator from the second position onward.
    let Some((&first, rest)) = collapsed.split_first() else {
        return String::new();
    };
    std::iter::once(first)
        .chain(rest.iter().copied().filter(|d| *d != 0))
        .map(|d| (b'0' + d) as char)
        .collect()
}
