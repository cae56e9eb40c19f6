//! Weighted entity extraction.
//!
//! Ported from the Python original's `nlp_analysis.py::extract_weighted_entities`:
//! three passes over a parsed document — NER spans, then bare proper/common
//! nouns, then noun chunks — each pass skipping lemmas the previous pass
//! already claimed.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::analyzer::{ParsedDocument, Pos};

/// NER-label → weight table. Unlabeled/unknown kinds default to 1.0.
static ENTITY_WEIGHTS: Lazy<Vec<(&'static str, f32)>> = Lazy::new(|| {
    vec![
        ("PERSON", 3.0),
        ("ORG", 2.5),
        ("GPE", 2.5),
        ("LOC", 2.0),
        ("PRODUCT", 2.0),
        ("EVENT", 2.0),
        ("WORK_OF_ART", 1.5),
        ("NORP", 1.5),
        ("FAC", 1.5),
        ("DATE", 0.5),
        ("TIME", 0.5),
        ("MONEY", 0.5),
        ("QUANTITY", 0.3),
        ("CARDINAL", 0.2),
        ("ORDINAL", 0.2),
    ]
});

fn weight_for_label(label: &str) -> f32 {
    ENTITY_WEIGHTS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, w)| *w)
        .unwrap_or(1.0)
}

/// Default weight for a bare common noun not caught by NER.
pub const DEFAULT_NOUN_WEIGHT: f32 = 1.0;
/// Default weight for a bare proper noun not caught by NER.
pub const DEFAULT_PROPN_WEIGHT: f32 = 2.0;

/// An entity surfaced by extraction, weighted by its significance for topic
/// detection. Identity and equality are by `lemma`.
#[derive(Debug, Clone)]
pub struct WeightedEntity {
    pub text: String,
    pub lemma: String,
    pub kind: String,
    pub weight: f32,
}

impl PartialEq for WeightedEntity {
    fn eq(&self, other: &Self) -> bool {
        self.lemma == other.lemma
    }
}
impl Eq for WeightedEntity {}

impl std::hash::Hash for WeightedEntity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lemma.hash(state);
    }
}

/// Weighted entity set produced by [`extract_weighted_entities`].
#[derive(Debug, Clone, Default)]
pub struct EntityAnalysis {
    /// Insertion-ordered entities; order matters for deterministic output.
    pub entities: Vec<WeightedEntity>,
    pub total_weight: f32,
    pub high_value_lemmas: HashSet<String>,
}

impl EntityAnalysis {
    /// The set of (lowercased) lemmas present in this analysis.
    pub fn lemma_set(&self) -> HashSet<String> {
        self.entities.iter().map(|e| e.lemma.clone()).collect()
    }
}

/// Extract a weighted entity set from a parsed document.
///
/// Walks three passes, never adding a lemma twice (first-writer wins):
/// named entities, then bare proper/common nouns, then noun chunks.
pub fn extract_weighted_entities(doc: &ParsedDocument) -> EntityAnalysis {
    let mut entities = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    // Pass 1: named entities.
    for ent in &doc.entities {
        let lemma = ent.text.to_lowercase();
        if seen.contains(&lemma) || lemma.len() <= 2 {
            continue;
        }
        entities.push(WeightedEntity {
            text: ent.text.clone(),
            lemma: lemma.clone(),
            kind: ent.label.clone(),
            weight: weight_for_label(&ent.label),
        });
        seen.insert(lemma);
    }

    // Pass 2: bare nouns/proper nouns not already claimed.
    for token in &doc.tokens {
        let lemma = token.lemma.to_lowercase();
        if seen.contains(&lemma) || lemma.len() <= 3 || token.is_stop {
            continue;
        }
        match token.pos {
            Pos::ProperNoun => {
                entities.push(WeightedEntity {
                    text: token.text.clone(),
                    lemma: lemma.clone(),
                    kind: "PROPN".to_string(),
                    weight: DEFAULT_PROPN_WEIGHT,
                });
                seen.insert(lemma);
            }
            Pos::Noun => {
                entities.push(WeightedEntity {
                    text: token.text.clone(),
                    lemma: lemma.clone(),
                    kind: "NOUN".to_string(),
                    weight: DEFAULT_NOUN_WEIGHT,
                });
                seen.insert(lemma);
            }
            _ => {}
        }
    }

    // Pass 3: noun chunks not already claimed.
    for chunk in &doc.chunks {
        let lemma = chunk.text.to_lowercase();
        if seen.contains(&lemma) || lemma.len() <= 4 {
            continue;
        }
        let has_propn = doc.tokens[chunk.start..chunk.end]
            .iter()
            .any(|t| t.pos == Pos::ProperNoun);
        let weight = if has_propn {
            DEFAULT_PROPN_WEIGHT
        } else {
            DEFAULT_NOUN_WEIGHT
        };
        entities.push(WeightedEntity {
            text: chunk.text.clone(),
            lemma: lemma.clone(),
            kind: "NOUN_CHUNK".to_string(),
            weight,
        });
        seen.insert(lemma);
    }

    let total_weight = entities.iter().map(|e| e.weight).sum();
    let high_value_lemmas = entities
        .iter()
        .filter(|e| e.weight >= 2.0)
        .map(|e| e.lemma.clone())
        .collect();

    EntityAnalysis {
        entities,
        total_weight,
        high_value_lemmas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;
    use crate::analyzer::Analyzer;

    #[test]
    fn person_entity_outweighs_bare_noun() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("Sarah is planning the kitchen renovation.");
        let analysis = extract_weighted_entities(&doc);
        let sarah = analysis.entities.iter().find(|e| e.lemma == "sarah");
        assert!(sarah.is_some());
        assert_eq!(sarah.unwrap().weight, 3.0);
    }

    #[test]
    fn lemma_is_never_added_twice() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("Sarah talked to Sarah about the kitchen.");
        let analysis = extract_weighted_entities(&doc);
        let count = analysis.entities.iter().filter(|e| e.lemma == "sarah").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn high_value_lemmas_are_weight_at_least_two() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("Sarah is planning the kitchen renovation.");
        let analysis = extract_weighted_entities(&doc);
        assert!(analysis.high_value_lemmas.contains("sarah"));
    }

    #[test]
    fn total_weight_sums_accepted_entities() {
        let analyzer = RuleAnalyzer::new();
        let doc = analyzer.parse("Sarah is planning the kitchen renovation.");
        let analysis = extract_weighted_entities(&doc);
        let expected: f32 = analysis.entities.iter().map(|e| e.weight).sum();
        assert_eq!(analysis.total_weight, expected);
    }
}
