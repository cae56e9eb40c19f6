//! Entity-overlap scoring.
//!
//! Two scorers live here, both grounded in the Python original's
//! `server.py`/`nlp_analysis.py`: the weighted overlap the boost engine
//! consumes ([`weighted_overlap`]), and the looser set-cardinality overlap
//! the `/entity-overlap` endpoint exposes for "did this reply reference a
//! rare term from that message?" recall ([`set_overlap`]).

use std::collections::BTreeSet;

use crate::analyzer::{Analyzer, Pos};
use crate::entities::EntityAnalysis;

/// Weighted overlap between a current and a previous message's entity
/// analyses, as consumed by the boost engine.
#[derive(Debug, Clone)]
pub struct WeightedOverlap {
    /// `shared_weight / current.total_weight`, or `0.0` if the current
    /// message has no weighted entities.
    pub score: f32,
    /// Lemmas present in both analyses, sorted for deterministic output.
    pub shared: Vec<String>,
    /// Sum of weights of current entities whose lemma is not in `previous`.
    pub new_weight: f32,
}

/// Weighted entity overlap between two analyzed messages.
pub fn weighted_overlap(current: &EntityAnalysis, previous: &EntityAnalysis) -> WeightedOverlap {
    let current_set = current.lemma_set();
    let previous_set = previous.lemma_set();

    let shared: BTreeSet<String> = current_set.intersection(&previous_set).cloned().collect();
    let new_entities: BTreeSet<String> = current_set.difference(&previous_set).cloned().collect();

    let shared_weight: f32 = current
        .entities
        .iter()
        .filter(|e| shared.contains(&e.lemma))
        .map(|e| e.weight)
        .sum();
    let new_weight: f32 = current
        .entities
        .iter()
        .filter(|e| new_entities.contains(&e.lemma))
        .map(|e| e.weight)
        .sum();

    let score = if current.total_weight > 0.0 {
        shared_weight / current.total_weight
    } else {
        0.0
    };

    WeightedOverlap {
        score,
        shared: shared.into_iter().collect(),
        new_weight,
    }
}

/// Build the loose entity set the `/entity-overlap` endpoint compares:
/// NER span surface text, noun/proper-noun lemma *and* surface form (length
/// > 3), plus noun-chunk text and every non-stop chunk token's lemma and
/// surface form (length > 3).
pub fn entity_overlap_set(text: &str, analyzer: &dyn Analyzer) -> BTreeSet<String> {
    let doc = analyzer.parse(&text.to_lowercase());
    let mut set = BTreeSet::new();

    for ent in &doc.entities {
        set.insert(ent.text.to_lowercase());
    }

    for token in &doc.tokens {
        if token.pos.is_noun_like() && token.text.len() > 3 {
            set.insert(token.lemma.to_lowercase());
            set.insert(token.lower.clone());
        }
    }

    for chunk in &doc.chunks {
        if chunk.text.len() > 3 {
            set.insert(chunk.text.to_lowercase());
            for token in &doc.tokens[chunk.start..chunk.end] {
                if token.text.len() > 3 && !token.is_stop {
                    set.insert(token.lemma.to_lowercase());
                    set.insert(token.lower.clone());
                }
            }
        }
    }

    set
}

/// Set-cardinality overlap result for the `/entity-overlap` endpoint.
#[derive(Debug, Clone)]
pub struct SetOverlap {
    pub has_overlap: bool,
    pub overlap_score: f32,
    pub shared: Vec<String>,
    pub set1: Vec<String>,
    pub set2: Vec<String>,
}

/// Set-cardinality overlap: `|shared| / min(|set1|, |set2|)`.
pub fn set_overlap(text1: &str, text2: &str, analyzer: &dyn Analyzer) -> SetOverlap {
    let set1 = entity_overlap_set(text1, analyzer);
    let set2 = entity_overlap_set(text2, analyzer);

    let shared: BTreeSet<String> = set1.intersection(&set2).cloned().collect();
    let min_len = set1.len().min(set2.len());
    let overlap_score = if min_len > 0 {
        (shared.len() as f32 / min_len as f32).min(1.0)
    } else {
        0.0
    };

    SetOverlap {
        has_overlap: !shared.is_empty(),
        overlap_score,
        shared: shared.into_iter().collect(),
        set1: set1.into_iter().collect(),
        set2: set2.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;
    use crate::entities::extract_weighted_entities;

    #[test]
    fn weighted_overlap_is_zero_for_disjoint_messages() {
        let analyzer = RuleAnalyzer::new();
        let current = extract_weighted_entities(&analyzer.parse("Sarah loves Paris."));
        let previous = extract_weighted_entities(&analyzer.parse("The budget is tight."));
        let overlap = weighted_overlap(&current, &previous);
        assert_eq!(overlap.score, 0.0);
        assert!(overlap.shared.is_empty());
    }

    #[test]
    fn weighted_overlap_scores_shared_lemma() {
        let analyzer = RuleAnalyzer::new();
        let current = extract_weighted_entities(&analyzer.parse("Sarah is visiting Paris."));
        let previous = extract_weighted_entities(&analyzer.parse("Sarah called yesterday."));
        let overlap = weighted_overlap(&current, &previous);
        assert!(overlap.score > 0.0);
        assert!(overlap.shared.contains(&"sarah".to_string()));
    }

    #[test]
    fn set_overlap_references_rare_term() {
        let analyzer = RuleAnalyzer::new();
        let out = set_overlap(
            "the serpentine belt is squealing",
            "maybe it's the serpentine",
            &analyzer,
        );
        assert!(out.has_overlap);
        assert!(out.shared.contains(&"serpentine".to_string()));
    }
}
