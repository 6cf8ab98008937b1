// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hint label generation.
//!
//! Labels are the leaves of a breadth-first expanded code tree whose branching factor is the
//! alphabet size, so no label is a prefix of another and typing a full label is unambiguous.

use std::fmt;

use smol_str::SmolStr;

/// Ordered, case-folded set of distinct hint characters.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from `hint_chars`, lowercasing each character and keeping only the first
    /// occurrence of duplicates. An empty input yields an empty (degraded) alphabet.
    pub fn new(hint_chars: &str) -> Self {
        let mut chars = Vec::with_capacity(hint_chars.len());
        for ch in hint_chars.chars().map(fold_case) {
            if !chars.contains(&ch) {
                chars.push(ch);
            }
        }
        Self { chars }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Case-folds a typed character and returns it when it belongs to the alphabet.
    pub fn fold(&self, ch: char) -> Option<char> {
        let folded = fold_case(ch);
        self.chars.contains(&folded).then_some(folded)
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({:?})", self.chars.iter().collect::<String>())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl From<&str> for Alphabet {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Lowercases `ch` when it has a single-character lowercase form.
pub(crate) fn fold_case(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

/// Generates `count` prefix-free labels over `alphabet`.
///
/// Labels sharing a first keystroke are spread across the result so that a row-major rendering
/// does not cluster them. The output is deterministic for identical arguments.
///
/// Degrades instead of failing: an empty alphabet yields no labels, and a single-character
/// alphabet can only ever yield one label.
pub fn generate(count: usize, alphabet: &Alphabet) -> Vec<SmolStr> {
    let k = alphabet.len();
    if count == 0 || k == 0 {
        return Vec::new();
    }
    // A unary tree has exactly one leaf that is not a prefix of another.
    let count = if k == 1 { 1 } else { count };

    let mut hints = vec![String::new()];
    let mut offset = 0usize;
    while hints.len() - offset < count || hints.len() == 1 {
        let root = hints[offset].clone();
        offset += 1;
        for &ch in alphabet.chars() {
            let mut hint = String::with_capacity(root.len() + ch.len_utf8());
            hint.push(ch);
            hint.push_str(&root);
            hints.push(hint);
        }
    }

    let mut leaves = hints.split_off(offset);
    leaves.truncate(count);
    leaves.sort_unstable();

    leaves.into_iter().map(|hint| hint.chars().rev().collect::<SmolStr>()).collect()
}

/// Shorthand for `generate(count, &Alphabet::new(hint_chars))`.
pub fn gen_labels(count: usize, hint_chars: &str) -> Vec<SmolStr> {
    generate(count, &Alphabet::new(hint_chars))
}

#[cfg(test)]
mod tests {
    use super::{gen_labels, generate, Alphabet};
    use rstest::rstest;
    use std::collections::HashSet;

    fn assert_prefix_free(labels: &[smol_str::SmolStr]) {
        for (i, a) in labels.iter().enumerate() {
            for (j, b) in labels.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
                }
            }
        }
    }

    fn ceil_log(count: usize, k: usize) -> usize {
        let mut len = 0usize;
        let mut capacity = 1usize;
        while capacity < count {
            capacity = capacity.saturating_mul(k);
            len += 1;
        }
        len.max(1)
    }

    #[test]
    fn alphabet_folds_case_and_drops_duplicates() {
        let alphabet = Alphabet::new("AsaDs");
        assert_eq!(alphabet.chars(), &['a', 's', 'd']);
        assert_eq!(alphabet.to_string(), "asd");
    }

    #[test]
    fn alphabet_fold_accepts_members_only() {
        let alphabet = Alphabet::new("sad");
        assert_eq!(alphabet.fold('S'), Some('s'));
        assert_eq!(alphabet.fold('d'), Some('d'));
        assert_eq!(alphabet.fold('x'), None);
        assert_eq!(alphabet.fold('1'), None);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(gen_labels(0, "abc").is_empty());
    }

    #[test]
    fn empty_alphabet_is_empty() {
        assert!(gen_labels(5, "").is_empty());
        assert!(generate(1, &Alphabet::default()).is_empty());
    }

    #[test]
    fn single_target_gets_one_char_label() {
        assert_eq!(gen_labels(1, "sadjklewcmpgh"), vec!["s"]);
    }

    #[test]
    fn single_char_alphabet_degrades_to_one_label() {
        assert_eq!(gen_labels(1, "a"), vec!["a"]);
        assert_eq!(gen_labels(4, "a"), vec!["a"]);
    }

    #[test]
    fn three_targets_over_two_chars() {
        assert_eq!(gen_labels(3, "ab"), vec!["aa", "b", "ab"]);
    }

    #[test]
    fn five_targets_over_two_chars_are_prefix_free() {
        let labels = gen_labels(5, "ab");
        assert_eq!(labels.len(), 5);
        assert_prefix_free(&labels);
        for label in &labels {
            assert!((2..=3).contains(&label.len()), "unexpected length: {label}");
        }
    }

    #[test]
    fn fits_alphabet_uses_single_chars_in_sorted_order() {
        assert_eq!(gen_labels(3, "sad"), vec!["a", "d", "s"]);
    }

    #[test]
    fn labels_sharing_first_key_are_interleaved() {
        let labels = gen_labels(6, "abc");
        assert_eq!(labels, vec!["aa", "ba", "ab", "bb", "c", "ac"]);
        assert_prefix_free(&labels);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(gen_labels(40, "sadjklewcmpgh"), gen_labels(40, "sadjklewcmpgh"));
    }

    #[rstest]
    #[case("ab", 1)]
    #[case("ab", 2)]
    #[case("ab", 7)]
    #[case("ab", 64)]
    #[case("abc", 10)]
    #[case("sadjklewcmpgh", 13)]
    #[case("sadjklewcmpgh", 14)]
    #[case("sadjklewcmpgh", 200)]
    #[case("sadjklewcmpgh", 2_000)]
    fn labels_are_unique_prefix_free_and_short(#[case] hint_chars: &str, #[case] count: usize) {
        let labels = gen_labels(count, hint_chars);
        assert_eq!(labels.len(), count);

        let unique = labels.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), count);

        if count <= 200 {
            assert_prefix_free(&labels);
        } else {
            let set = labels.iter().map(|label| label.as_str()).collect::<HashSet<_>>();
            for label in &labels {
                for end in 1..label.len() {
                    assert!(!set.contains(&label[..end]), "{} has a labelled prefix", label);
                }
            }
        }

        let expected = ceil_log(count, Alphabet::new(hint_chars).len());
        for label in &labels {
            let len = label.chars().count();
            assert!(
                len + 1 >= expected && len <= expected + 1,
                "label {label} length {len} not within 1 of {expected}"
            );
        }
    }
}
