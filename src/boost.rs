//! Boost/floor engine.
//!
//! Composes raw cosine similarity between a current-message vector and a
//! branch centroid with linguistic features from [`crate::message`] into a
//! calibrated drift score, plus an auditable list of the rules that fired.
//! Rule order and constants are carried over from the Python original's
//! `server.py::analyze_drift`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::analyzer::Analyzer;
use crate::message::{analyze_message, MessageAnalysis};
use crate::overlap::weighted_overlap;

const QA_BOOST_FACTOR: f32 = 1.3;
const RECENCY_BOOST_FACTOR: f32 = 1.6;
const ANAPHORIC_BOOST_FACTOR: f32 = 1.5;
const ENTITY_OVERLAP_BOOST_FACTOR: f32 = 2.0;

const ANAPHORIC_SIMILARITY_FLOOR: f32 = 0.45;
const SHORT_RESPONSE_FLOOR: f32 = 0.50;
const SHORT_RESPONSE_MAX_WORDS: usize = 2;
const RESPONSE_PARTICLE_FLOOR: f32 = 0.55;
const RESPONSE_PARTICLE_MAX_WORDS: usize = 4;
const QA_PAIR_MAX_WORDS: usize = 10;

/// Short affirmative/negative/acknowledgment/uncertainty/continuation and
/// discourse-marker tokens that indicate continuation regardless of raw
/// embedding similarity.
static RESPONSE_PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Affirmative
        "yes", "yeah", "yep", "yup", "ya", "aye", "sure", "ok", "okay", "k", "absolutely",
        "definitely", "certainly", "indeed", "right", "correct", "agreed", "exactly", "true",
        "totally", "yea",
        // Negative
        "no", "nope", "nah", "never", "negative",
        // Acknowledgment
        "thanks", "thank", "thx", "ty", "cheers", "cool", "nice", "great", "awesome", "perfect",
        "wonderful", "excellent", "good", "fine",
        // Uncertainty
        "maybe", "perhaps", "possibly", "probably", "idk", "dunno",
        // Continuation signals
        "please", "pls", "plz", "go", "continue", "more", "next",
        // Discourse markers
        "well", "so", "anyway", "alright", "hmm", "hm", "oh", "ah", "uh",
    ]
    .into_iter()
    .collect()
});

/// Result of the boost/floor pipeline.
#[derive(Debug, Clone)]
pub struct BoostResult {
    pub raw: f32,
    pub boosted: f32,
    pub multiplier: f32,
    pub rules_applied: Vec<String>,
    pub current_analysis: MessageAnalysis,
    pub previous_analysis: MessageAnalysis,
}

/// Cosine similarity. Returns `0.0` if either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Classify a similarity score into a routing action per the `/drift`
/// threshold mapping: `sim > stay_threshold ⇒ STAY`, `branch_threshold <
/// sim ≤ stay_threshold ⇒ BRANCH_SAME_CLUSTER`, else `BRANCH_NEW_CLUSTER`.
pub fn classify_drift_action(sim: f32, stay_threshold: f32, branch_threshold: f32) -> &'static str {
    if sim > stay_threshold {
        "STAY"
    } else if sim > branch_threshold {
        "BRANCH_SAME_CLUSTER"
    } else {
        "BRANCH_NEW_CLUSTER"
    }
}

fn first_word_and_count(text: &str) -> (String, usize) {
    let words: Vec<&str> = text.split_whitespace().collect();
    let first = words
        .first()
        .map(|w| w.trim_matches(|c: char| ".,!?".contains(c)).to_lowercase())
        .unwrap_or_default();
    (first, words.len())
}

/// Whether the anaphoric floor should be suppressed: the current message is
/// already explicitly pivoting (preference, topic pivot, compound pivot),
/// or it introduces enough new high-weight entities that the drift is real.
fn should_suppress_anaphoric_floor(current: &MessageAnalysis, previous: &MessageAnalysis) -> bool {
    if current.has_preference || current.has_topic_pivot || current.pivot_detected {
        return true;
    }

    let previous_lemmas = previous.all_entities.lemma_set();
    let new_entities: Vec<_> = current
        .all_entities
        .entities
        .iter()
        .filter(|e| !previous_lemmas.contains(&e.lemma))
        .collect();

    let new_weight: f32 = new_entities.iter().map(|e| e.weight).sum();
    if new_weight >= 4.0 {
        return true;
    }

    let high_value_new = new_entities.iter().filter(|e| e.weight >= 2.0).count();
    high_value_new >= 2
}

/// Run the boost/floor pipeline over a current/previous message pair and a
/// raw cosine similarity between their embeddings.
pub fn compute_boost(
    current_text: &str,
    previous_text: &str,
    current_embedding: &[f32],
    branch_centroid: &[f32],
    analyzer: &dyn Analyzer,
) -> BoostResult {
    let raw = cosine_similarity(current_embedding, branch_centroid);
    let current_analysis = analyze_message(analyzer, current_text);
    let previous_analysis = analyze_message(analyzer, previous_text);

    // Short-circuit A: preference. User is explicitly comparing/pivoting.
    if current_analysis.has_preference {
        return BoostResult {
            raw,
            boosted: raw,
            multiplier: 1.0,
            rules_applied: vec!["preference_detected".to_string()],
            current_analysis,
            previous_analysis,
        };
    }

    // Short-circuit B: topic pivot.
    if current_analysis.has_topic_pivot {
        return BoostResult {
            raw,
            boosted: raw,
            multiplier: 1.0,
            rules_applied: Vec::new(),
            current_analysis,
            previous_analysis,
        };
    }

    let mut boosted = raw;
    let mut rules_applied = Vec::new();

    let (first_word, word_count) = first_word_and_count(current_text);

    let is_response_particle =
        RESPONSE_PARTICLES.contains(first_word.as_str()) && word_count <= RESPONSE_PARTICLE_MAX_WORDS;
    if is_response_particle {
        boosted = boosted.max(RESPONSE_PARTICLE_FLOOR);
        rules_applied.push("response_particle".to_string());
    } else if word_count <= SHORT_RESPONSE_MAX_WORDS && !current_analysis.is_question {
        boosted = boosted.max(SHORT_RESPONSE_FLOOR);
        rules_applied.push("ultra_short_response".to_string());
    }

    if previous_analysis.is_question && !current_analysis.is_question && word_count <= QA_PAIR_MAX_WORDS
    {
        boosted *= QA_BOOST_FACTOR;
        rules_applied.push("qa_pair".to_string());
    }

    if current_analysis.has_anaphoric_ref {
        if should_suppress_anaphoric_floor(&current_analysis, &previous_analysis) {
            boosted *= ANAPHORIC_BOOST_FACTOR;
            rules_applied.push("anaphoric_ref_weak".to_string());
        } else {
            boosted = boosted.max(ANAPHORIC_SIMILARITY_FLOOR);
            boosted *= ANAPHORIC_BOOST_FACTOR;
            rules_applied.push("anaphoric_ref".to_string());
        }
    }

    if current_analysis.is_question {
        boosted *= RECENCY_BOOST_FACTOR;
        rules_applied.push("question".to_string());
    }

    let overlap = weighted_overlap(&current_analysis.all_entities, &previous_analysis.all_entities);
    if !overlap.shared.is_empty() {
        boosted *= 1.0 + (ENTITY_OVERLAP_BOOST_FACTOR - 1.0) * overlap.score.min(1.0);
        rules_applied.push("entity_overlap".to_string());
    }

    boosted = boosted.min(1.0);
    let multiplier = if raw > 0.0 { boosted / raw } else { 1.0 };

    BoostResult {
        raw,
        boosted,
        multiplier,
        rules_applied,
        current_analysis,
        previous_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;

    #[test]
    fn preference_short_circuits_with_raw_untouched() {
        let analyzer = RuleAnalyzer::new();
        let v = vec![1.0, 0.0, 0.0];
        let result = compute_boost(
            "I prefer pizza to salad.",
            "What should we eat?",
            &v,
            &v,
            &analyzer,
        );
        assert_eq!(result.raw, result.boosted);
        assert_eq!(result.multiplier, 1.0);
        assert_eq!(result.rules_applied, vec!["preference_detected"]);
    }

    #[test]
    fn response_particle_floors_low_similarity() {
        let analyzer = RuleAnalyzer::new();
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let result = compute_boost("yes", "Did you finish the report?", &a, &b, &analyzer);
        assert!(result.boosted >= RESPONSE_PARTICLE_FLOOR);
        assert!(result.rules_applied.contains(&"response_particle".to_string()));
    }

    #[test]
    fn question_applies_recency_multiplier() {
        let analyzer = RuleAnalyzer::new();
        let v = vec![1.0, 1.0, 0.0];
        let w = vec![1.0, 1.0, 0.0];
        let result = compute_boost("What about the budget?", "We discussed the kitchen.", &v, &w, &analyzer);
        assert!(result.rules_applied.contains(&"question".to_string()));
    }

    #[test]
    fn boosted_never_exceeds_one() {
        let analyzer = RuleAnalyzer::new();
        let v = vec![1.0, 1.0];
        let result = compute_boost("yes, what about Sarah in Paris?", "Did Sarah go to Paris?", &v, &v, &analyzer);
        assert!(result.boosted <= 1.0);
    }

    #[test]
    fn drift_action_thresholds() {
        assert_eq!(classify_drift_action(0.5, 0.38, 0.15), "STAY");
        assert_eq!(classify_drift_action(0.2, 0.38, 0.15), "BRANCH_SAME_CLUSTER");
        assert_eq!(classify_drift_action(0.05, 0.38, 0.15), "BRANCH_NEW_CLUSTER");
    }
}
