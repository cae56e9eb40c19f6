//! Per-sentence and per-message linguistic analysis.
//!
//! Ported from the Python original's `nlp_analysis.py`: question detection,
//! anaphora detection, preference/comparison extraction, topic-pivot
//! detection, and their aggregation (including compound-message pivot
//! detection) into a message-level verdict.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::{Analyzer, Dep, ParsedDocument, Pos};
use crate::entities::{extract_weighted_entities, EntityAnalysis};

static PREFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(prefer|rather|instead of|better than|over|compared to|versus|vs\.?)\b")
        .unwrap()
});

static TOPIC_PIVOT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(back to|returning to|going back to|anyway|speaking of|on another note|changing topic|different subject|but about|so about|regarding)\b",
    )
    .unwrap()
});

static IMPLICIT_QUESTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(tell me|explain|describe|show me|help me understand|i wonder|i'm curious|wondering if|interested to know|want to know|need to know|let me know)\b",
    )
    .unwrap()
});

const INTERROGATIVES: &[&str] = &["who", "what", "where", "when", "why", "how", "which", "whom", "whose"];
const INVERSION_AUX: &[&str] = &[
    "can", "could", "would", "should", "do", "does", "did", "is", "are", "was", "were", "will",
    "have", "has",
];
const DEMONSTRATIVES: &[&str] = &["this", "that", "these", "those"];

/// Per-sentence linguistic verdict.
#[derive(Debug, Clone)]
pub struct SentenceAnalysis {
    pub text: String,
    pub is_question: bool,
    pub has_anaphoric_ref: bool,
    pub has_preference: bool,
    pub has_topic_pivot: bool,
    pub entities: EntityAnalysis,
    pub preferred_phrase: Option<String>,
    pub rejected_phrase: Option<String>,
}

/// Message-level linguistic verdict, aggregated from its sentences.
#[derive(Debug, Clone)]
pub struct MessageAnalysis {
    pub sentences: Vec<SentenceAnalysis>,
    pub is_question: bool,
    pub has_anaphoric_ref: bool,
    pub has_preference: bool,
    pub has_topic_pivot: bool,
    pub all_entities: EntityAnalysis,
    pub is_compound: bool,
    pub pivot_detected: bool,
    pub preferred_phrase: Option<String>,
    pub rejected_phrase: Option<String>,
}

fn is_question(doc: &ParsedDocument, raw_text: &str) -> bool {
    if raw_text.contains('?') {
        return true;
    }
    if let Some(first) = doc.tokens.first() {
        let lower = first.lower.as_str();
        if INTERROGATIVES.contains(&lower) {
            return true;
        }
        if INVERSION_AUX.contains(&lower) {
            return true;
        }
    }
    IMPLICIT_QUESTION_PATTERN.is_match(raw_text)
}

fn has_anaphoric_reference(doc: &ParsedDocument) -> bool {
    let local_referents: Vec<&str> = doc
        .tokens
        .iter()
        .filter(|t| t.pos.is_noun_like())
        .map(|t| t.lemma.as_str())
        .collect();

    let has_plural = doc.tokens.iter().any(|t| t.tag == "NNS" || t.tag == "NNPS");

    for token in &doc.tokens {
        let lower = token.lower.as_str();

        if DEMONSTRATIVES.contains(&lower) {
            let near_start = token.index <= 2;
            let is_subject = matches!(token.dep, Dep::Nsubj | Dep::Nsubjpass);
            if near_start || is_subject {
                if matches!(
                    token.dep,
                    Dep::Nsubj | Dep::Nsubjpass | Dep::Dobj | Dep::Pobj | Dep::Attr
                ) {
                    return true;
                }
                if token.pos == Pos::Pronoun {
                    return true;
                }
            }
        }

        if lower == "it" || lower == "its" {
            // An expletive "it" (e.g. "it's raining") carries no referent;
            // we approximate expletive detection by requiring root-adjacent
            // position, since this analyzer has no `expl` label.
            if !local_referents.is_empty() {
                continue;
            }
            if token.pos == Pos::Pronoun || token.pos == Pos::Det {
                return true;
            }
        }

        if lower == "they" || lower == "them" || lower == "their" {
            if (token.pos == Pos::Pronoun || token.pos == Pos::Det) && !has_plural {
                return true;
            }
        }
    }

    false
}

fn detect_preference(doc: &ParsedDocument, raw_text: &str) -> (bool, Option<String>, Option<String>) {
    if !PREFERENCE_PATTERN.is_match(raw_text) {
        return (false, None, None);
    }

    let mut preferred = None;
    let mut rejected = None;

    for token in &doc.tokens {
        let lower = token.lower.as_str();

        if lower == "prefer" || lower == "rather" {
            for child in doc.children(token.index) {
                if child.dep == Dep::Dobj {
                    preferred = Some(doc.subtree_text(child.index));
                } else if child.dep == Dep::Prep && child.lower == "to" {
                    for pobj in doc.children(child.index) {
                        if pobj.dep == Dep::Pobj {
                            rejected = Some(doc.subtree_text(pobj.index));
                        }
                    }
                }
            }
        }

        if lower == "over" && token.dep == Dep::Prep {
            for pobj in doc.children(token.index) {
                if pobj.dep == Dep::Pobj {
                    rejected = Some(doc.subtree_text(pobj.index));
                }
            }
            if let Some(head) = doc.tokens.get(token.head) {
                if head.pos.is_noun_like() && head.index != token.index {
                    preferred = Some(doc.subtree_text(head.index));
                }
            }
        }
    }

    (true, preferred, rejected)
}

/// Analyze a single sentence, given its own parsed sub-document and raw
/// surface text.
pub fn analyze_sentence(doc: &ParsedDocument, raw_text: &str) -> SentenceAnalysis {
    let entities = extract_weighted_entities(doc);
    let (has_preference, preferred_phrase, rejected_phrase) = detect_preference(doc, raw_text);

    SentenceAnalysis {
        text: raw_text.to_string(),
        is_question: is_question(doc, raw_text),
        has_anaphoric_ref: has_anaphoric_reference(doc),
        has_preference,
        has_topic_pivot: TOPIC_PIVOT_PATTERN.is_match(raw_text),
        entities,
        preferred_phrase,
        rejected_phrase,
    }
}

/// Analyze a full message: split into sentences, analyze each with its own
/// parsed sub-document, and aggregate into a message-level verdict.
pub fn analyze_message(analyzer: &dyn Analyzer, raw_text: &str) -> MessageAnalysis {
    let doc = analyzer.parse(raw_text);
    let all_entities = extract_weighted_entities(&doc);

    let sentence_analyses: Vec<SentenceAnalysis> = doc
        .sentences
        .iter()
        .map(|span| {
            let sentence_text = doc.sentence_text(*span);
            let sub_doc = analyzer.parse(&sentence_text);
            analyze_sentence(&sub_doc, &sentence_text)
        })
        .collect();

    let is_question = sentence_analyses.iter().any(|s| s.is_question);
    let has_anaphoric_ref = sentence_analyses.iter().any(|s| s.has_anaphoric_ref);
    let has_preference = sentence_analyses.iter().any(|s| s.has_preference);
    let has_topic_pivot = sentence_analyses.iter().any(|s| s.has_topic_pivot);

    let is_compound = sentence_analyses.len() > 1;
    let mut pivot_detected = false;

    if is_compound {
        if let Some((first, rest)) = sentence_analyses.split_first() {
            if first.has_anaphoric_ref {
                let first_set = first.entities.lemma_set();
                let mut rest_set = std::collections::HashSet::new();
                for s in rest {
                    rest_set.extend(s.entities.lemma_set());
                }
                let new_in_rest = rest_set.difference(&first_set).count();
                if new_in_rest >= 1 {
                    pivot_detected = true;
                }
            }
        }
    }

    let mut preferred_phrase = None;
    let mut rejected_phrase = None;
    for s in &sentence_analyses {
        if s.preferred_phrase.is_some() {
            preferred_phrase = s.preferred_phrase.clone();
        }
        if s.rejected_phrase.is_some() {
            rejected_phrase = s.rejected_phrase.clone();
        }
    }

    MessageAnalysis {
        sentences: sentence_analyses,
        is_question,
        has_anaphoric_ref,
        has_preference,
        has_topic_pivot,
        all_entities,
        is_compound,
        pivot_detected,
        preferred_phrase,
        rejected_phrase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;

    #[test]
    fn question_mark_is_detected() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "What about the kitchen?");
        assert!(analysis.is_question);
    }

    #[test]
    fn implicit_question_phrase_is_detected() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "Tell me about the budget.");
        assert!(analysis.is_question);
    }

    #[test]
    fn preference_pattern_extracts_phrases() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "I prefer pizza to salad.");
        assert!(analysis.has_preference);
    }

    #[test]
    fn topic_pivot_phrase_is_detected() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "Anyway, back to the kitchen renovation.");
        assert!(analysis.has_topic_pivot);
    }

    #[test]
    fn single_sentence_is_not_compound() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "I like pizza.");
        assert!(!analysis.is_compound);
    }

    #[test]
    fn multi_sentence_message_is_compound() {
        let analyzer = RuleAnalyzer::new();
        let analysis = analyze_message(&analyzer, "That's great. Sarah is visiting Paris next week.");
        assert!(analysis.is_compound);
    }
}
