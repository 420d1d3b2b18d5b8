//! Short code generation.
//!
//! Codes are fixed-length strings drawn uniformly from a configured alphabet.
//! Alphabet and length come from [`crate::config::Config`]; uniqueness is the
//! concern of [`crate::application::services::LinkService`], not of this module.

use anyhow::Result;
use rand::Rng;

/// Generates random short codes from a configured alphabet.
///
/// Sampling is with replacement: a code may repeat characters. The codespace
/// size is `alphabet.len() ^ length`, which bounds how many links can exist
/// before collisions dominate.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator over `alphabet` producing codes of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty, contains repeated characters,
    /// or the length is zero. [`crate::config::Config::validate`] enforces the
    /// same rules, so this only trips on hand-built generators.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        let chars: Vec<char> = alphabet.chars().collect();

        if chars.is_empty() {
            anyhow::bail!("code alphabet must not be empty");
        }
        if length == 0 {
            anyhow::bail!("code length must be at least 1");
        }

        let mut seen = std::collections::HashSet::new();
        for c in &chars {
            if !seen.insert(*c) {
                anyhow::bail!("code alphabet contains repeated character '{}'", c);
            }
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Produces one random code. Each character is an independent uniform
    /// draw from the alphabet.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }

    /// Returns true if `code` has the configured length and every character
    /// belongs to the alphabet. Used to reject junk path segments before
    /// they reach the database.
    pub fn matches(&self, code: &str) -> bool {
        code.chars().count() == self.length && code.chars().all(|c| self.alphabet.contains(&c))
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rejects_empty_alphabet() {
        assert!(CodeGenerator::new("", 5).is_err());
    }

    #[test]
    fn test_rejects_zero_length() {
        assert!(CodeGenerator::new("abc", 0).is_err());
    }

    #[test]
    fn test_rejects_repeated_characters() {
        assert!(CodeGenerator::new("abca", 5).is_err());
    }

    #[test]
    fn test_generate_has_exact_length() {
        let generator = CodeGenerator::new("abcdef123", 7).unwrap();

        for _ in 0..100 {
            assert_eq!(generator.generate().chars().count(), 7);
        }
    }

    #[test]
    fn test_generate_draws_only_from_alphabet() {
        let generator = CodeGenerator::new("xyz", 16).unwrap();

        for _ in 0..100 {
            let code = generator.generate();
            assert!(code.chars().all(|c| "xyz".contains(c)), "bad code {code}");
        }
    }

    #[test]
    fn test_generate_single_char_alphabet() {
        let generator = CodeGenerator::new("a", 4).unwrap();
        assert_eq!(generator.generate(), "aaaa");
    }

    #[test]
    fn test_generate_roughly_uniform() {
        // 8000 single-char draws over 4 characters: each expected ~2000.
        // The tolerance is >10 standard deviations wide, so this cannot
        // flake in practice while still catching a skewed sampler.
        let generator = CodeGenerator::new("abcd", 1).unwrap();
        let mut counts: HashMap<char, usize> = HashMap::new();

        for _ in 0..8000 {
            let code = generator.generate();
            *counts.entry(code.chars().next().unwrap()).or_default() += 1;
        }

        for c in ['a', 'b', 'c', 'd'] {
            let n = counts.get(&c).copied().unwrap_or(0);
            assert!((1600..=2400).contains(&n), "char '{c}' drawn {n} times");
        }
    }

    #[test]
    fn test_matches_accepts_generated_codes() {
        let generator = CodeGenerator::new("abc123", 5).unwrap();

        for _ in 0..50 {
            assert!(generator.matches(&generator.generate()));
        }
    }

    #[test]
    fn test_matches_rejects_wrong_length_and_foreign_chars() {
        let generator = CodeGenerator::new("abc123", 5).unwrap();

        assert!(!generator.matches("ab12"));
        assert!(!generator.matches("ab12cc"));
        assert!(!generator.matches("abcd!"));
        assert!(!generator.matches(""));
    }
}
