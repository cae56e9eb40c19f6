//! Encoder-facing text normalization.
//!
//! Lowercases, strips punctuation, runs the [`Analyzer`] for lemmatization,
//! and drops a fixed set of low-signal lemmas so the encoder sees only
//! topic-bearing words. The `REMOVE_WORDS` set and fallback basic filter
//! below are carried over verbatim from the Python original's
//! `preprocessing.py`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::analyzer::Analyzer;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static REMOVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Articles & Determiners
        "a", "an", "the", "this", "that", "these", "those", "some", "any",
        // Politeness markers
        "please", "pls", "plz", "thanks", "thank", "thankyou", "ty", "sorry",
        // Fillers
        "just", "really", "very", "quite", "kind", "kinda", "sort", "sortof", "actually",
        "basically", "literally", "so", "much", "um", "uh", "well", "like", "ok", "okay",
        "yeah", "yes", "no", "right",
        // Question scaffolding (lemmatized forms)
        "can", "could", "would", "should", "do", "be", "have", "will", "wonder", "maybe",
        "perhaps", "possible", "possibly",
        // Common low-signal verbs (lemmatized forms)
        "get", "go", "come", "let", "make", "take", "give", "need", "want", "know", "think",
        "see", "look", "find", "tell", "say", "ask",
        // Pronouns
        "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he",
        "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs",
        "-pron-",
        // Question words
        "here", "there", "now", "then", "where", "when", "what", "how", "why", "which",
        // Prepositions
        "to", "of", "in", "for", "on", "with", "at", "by", "from", "as",
        // Conjunctions
        "and", "or", "but", "if", "because", "while", "although",
    ]
    .into_iter()
    .collect()
});

static BASIC_FILTER: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["um", "uh", "like", "just", "really", "actually", "basically"]
        .into_iter()
        .collect()
});

/// Lowercase, strip non-word characters, and collapse whitespace. Shared by
/// [`preprocess`] and [`preprocess_batch`] ahead of analyzer parsing.
fn clean(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let normalized: String = text.nfc().collect();
    let lower = normalized.to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn lemmas_from_cleaned(cleaned: &str, analyzer: &dyn Analyzer) -> Vec<String> {
    if cleaned.is_empty() {
        return Vec::new();
    }
    let doc = analyzer.parse(cleaned);
    doc.tokens
        .iter()
        .filter(|t| !t.is_punct && !t.is_space)
        .map(|t| t.lemma.to_lowercase())
        .filter(|lemma| !REMOVE_WORDS.contains(lemma.as_str()) && lemma.len() > 1)
        .collect()
}

fn fallback(cleaned: &str) -> String {
    cleaned
        .split_whitespace()
        .filter(|t| !BASIC_FILTER.contains(*t) && t.len() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize raw text into a space-joined stream of topic-bearing lemmas,
/// suitable as encoder input.
pub fn preprocess(text: &str, analyzer: &dyn Analyzer) -> String {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return String::new();
    }

    let lemmas = lemmas_from_cleaned(&cleaned, analyzer);
    if lemmas.len() < 2 {
        return fallback(&cleaned);
    }
    lemmas.join(" ")
}

/// Batch variant of [`preprocess`]. Output order matches input order 1:1;
/// empty inputs map to empty outputs and are not dropped.
///
/// Cleaning and the per-document lemma filter are independent per input, so
/// both stages fan out over `rayon`'s global pool; only the analyzer's own
/// batch parse (step 3 of §4.1, possibly an external NLP call) stays
/// sequential.
pub fn preprocess_batch(texts: &[&str], analyzer: &dyn Analyzer) -> Vec<String> {
    let cleaned: Vec<String> = texts.par_iter().map(|t| clean(t)).collect();
    let non_empty_refs: Vec<&str> = cleaned
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| c.as_str())
        .collect();
    let mut parsed = analyzer.parse_batch(&non_empty_refs).into_iter();

    let slots: Vec<Option<_>> = cleaned
        .iter()
        .map(|c| if c.is_empty() { None } else { Some(parsed.next().unwrap_or_default()) })
        .collect();

    cleaned
        .par_iter()
        .zip(slots.into_par_iter())
        .map(|(c, doc)| {
            let doc = match doc {
                Some(doc) => doc,
                None => return String::new(),
            };
            let lemmas: Vec<String> = doc
                .tokens
                .iter()
                .filter(|t| !t.is_punct && !t.is_space)
                .map(|t| t.lemma.to_lowercase())
                .filter(|lemma| !REMOVE_WORDS.contains(lemma.as_str()) && lemma.len() > 1)
                .collect();
            if lemmas.len() < 2 {
                fallback(c)
            } else {
                lemmas.join(" ")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;

    #[test]
    fn empty_input_yields_empty_output() {
        let analyzer = RuleAnalyzer::new();
        assert_eq!(preprocess("", &analyzer), "");
        assert_eq!(preprocess("   ", &analyzer), "");
    }

    #[test]
    fn strips_politeness_and_fillers() {
        let analyzer = RuleAnalyzer::new();
        let out = preprocess(
            "Could you please tell me about the kitchen renovation?",
            &analyzer,
        );
        assert!(out.contains("kitchen"));
        assert!(out.contains("renovation"));
        assert!(!out.split_whitespace().any(|w| w == "please"));
        assert!(!out.split_whitespace().any(|w| w == "the"));
    }

    #[test]
    fn batch_preserves_order_and_keeps_empty_slots() {
        let analyzer = RuleAnalyzer::new();
        let out = preprocess_batch(
            &["kitchen renovation budget", "", "bathroom tile options"],
            &analyzer,
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], "");
        assert!(out[0].contains("kitchen"));
        assert!(out[2].contains("bathroom"));
    }

    #[test]
    fn falls_back_when_too_few_lemmas_survive() {
        let analyzer = RuleAnalyzer::new();
        let out = preprocess("um uh", &analyzer);
        assert_eq!(out, "");
    }
}
