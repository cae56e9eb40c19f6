//! Request handlers for the HTTP surface.
//!
//! Each handler returns `Result<Json<T>, DriftError>` where fallible, with
//! `DriftError` carrying its own `IntoResponse` impl (`http::error`) rather
//! than per-call-site `(StatusCode, String)` tuples — this surface has one
//! rich error enum, so centralizing the conversion avoids repeating the
//! status-code decision at every handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::boost::{classify_drift_action, compute_boost, cosine_similarity};
use crate::error::{DriftError, EncoderError, RequestError};
use crate::message::analyze_message;
use crate::overlap::{set_overlap, weighted_overlap};
use crate::preprocess::{preprocess, preprocess_batch};

use super::types::*;
use super::AppState;

static ANAPHORIC_FALLBACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(that'?s?|this|it'?s?|those|these|the same|them|its)\b").unwrap()
});

static TOPIC_PIVOT_FALLBACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(back to|returning to|going back to|anyway|speaking of|on another note|changing topic|different subject|but about|so about|regarding)\b",
    )
    .unwrap()
});

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.encoder.model_id().to_string(),
        device: state.device.clone(),
        dimension: state.encoder.dimension(),
    })
}

pub async fn embed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, DriftError> {
    let texts = req.text.into_vec();

    let to_encode: Vec<String> = if req.preprocess {
        let refs: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
        preprocess_batch(&refs, state.analyzer.as_ref())
    } else {
        texts.clone()
    };
    let refs: Vec<&str> = to_encode.iter().map(|t| t.as_str()).collect();

    let embeddings = state
        .encoder
        .encode_batch(&refs)
        .map_err(DriftError::Encoder)?;

    Ok(Json(EmbedResponse {
        embeddings,
        dimension: state.encoder.dimension(),
        model: state.encoder.model_id().to_string(),
        preprocessed_texts: if req.preprocess { Some(to_encode) } else { None },
    }))
}

pub async fn preprocess_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreprocessRequest>,
) -> Json<PreprocessResponse> {
    let original = req.text.into_vec();
    let refs: Vec<&str> = original.iter().map(|t| t.as_str()).collect();
    let preprocessed = preprocess_batch(&refs, state.analyzer.as_ref());
    Json(PreprocessResponse {
        original,
        preprocessed,
    })
}

pub async fn similarity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, DriftError> {
    let (t1, t2) = if req.preprocess {
        (
            preprocess(&req.text1, state.analyzer.as_ref()),
            preprocess(&req.text2, state.analyzer.as_ref()),
        )
    } else {
        (req.text1.clone(), req.text2.clone())
    };

    let vecs = state
        .encoder
        .encode_batch(&[t1.as_str(), t2.as_str()])
        .map_err(DriftError::Encoder)?;
    let similarity = cosine_similarity(&vecs[0], &vecs[1]);

    let adjusted_similarity = if req.text1.contains('?') && !req.text2.contains('?') {
        similarity * 1.3
    } else {
        similarity
    };

    Ok(Json(SimilarityResponse {
        similarity,
        adjusted_similarity,
        preprocessed_text1: req.preprocess.then_some(t1),
        preprocessed_text2: req.preprocess.then_some(t2),
    }))
}

pub async fn drift(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DriftRequest>,
) -> Result<Json<DriftResponse>, DriftError> {
    let (anchor, message) = if req.preprocess {
        (
            preprocess(&req.anchor, state.analyzer.as_ref()),
            preprocess(&req.message, state.analyzer.as_ref()),
        )
    } else {
        (req.anchor.clone(), req.message.clone())
    };

    let vecs = state
        .encoder
        .encode_batch(&[anchor.as_str(), message.as_str()])
        .map_err(DriftError::Encoder)?;
    let similarity = cosine_similarity(&vecs[0], &vecs[1]);

    let action = classify_drift_action(similarity, req.stay_threshold, req.branch_threshold);

    Ok(Json(DriftResponse {
        similarity,
        action: action.to_string(),
        preprocessed_anchor: req.preprocess.then_some(anchor),
        preprocessed_message: req.preprocess.then_some(message),
    }))
}

pub async fn entity_overlap(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EntityOverlapRequest>,
) -> Json<EntityOverlapResponse> {
    let out = set_overlap(&req.text1, &req.text2, state.analyzer.as_ref());
    Json(EntityOverlapResponse {
        has_overlap: out.has_overlap,
        overlap_score: out.overlap_score,
        shared_entities: out.shared,
        text1_entities: out.set1,
        text2_entities: out.set2,
    })
}

/// Shared by both `/analyze-message` and `/analyze-drift`: the topic-return
/// signal ORs in the fallback regex in both call sites (`has_topic_pivot or
/// TOPIC_PIVOT_PATTERNS.search` in the Python original applies to both), but
/// `current_has_anaphoric_ref` is left as the bare per-sentence flag — the
/// looser anaphoric fallback regex is only applied by the caller that wants
/// it (`/analyze-message`, see `build_analyze_message_response`).
fn analyze_message_response_base(
    current_text: &str,
    current: &crate::message::MessageAnalysis,
    previous: &crate::message::MessageAnalysis,
) -> AnalyzeMessageResponse {
    let overlap = weighted_overlap(&current.all_entities, &previous.all_entities);
    AnalyzeMessageResponse {
        current_is_question: current.is_question,
        previous_is_question: previous.is_question,
        current_has_anaphoric_ref: current.has_anaphoric_ref,
        has_topic_return_signal: current.has_topic_pivot
            || TOPIC_PIVOT_FALLBACK_PATTERN.is_match(current_text),
        has_preference: current.has_preference,
        preferred_entity: current.preferred_phrase.clone(),
        rejected_entity: current.rejected_phrase.clone(),
        entity_overlap: EntityOverlapSummary {
            has_overlap: !overlap.shared.is_empty(),
            overlap_score: overlap.score.min(1.0),
            shared_entities: overlap.shared,
        },
    }
}

/// `/analyze-message`'s response shape: also ORs in the looser anaphoric
/// fallback regex over the raw text, on top of the per-sentence analyzer
/// verdict.
fn build_analyze_message_response(
    current_text: &str,
    current: &crate::message::MessageAnalysis,
    previous: &crate::message::MessageAnalysis,
) -> AnalyzeMessageResponse {
    let mut response = analyze_message_response_base(current_text, current, previous);
    response.current_has_anaphoric_ref =
        response.current_has_anaphoric_ref || ANAPHORIC_FALLBACK_PATTERN.is_match(current_text);
    response
}

pub async fn analyze_message_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeMessageRequest>,
) -> Json<AnalyzeMessageResponse> {
    let current = analyze_message(state.analyzer.as_ref(), &req.current);
    let previous = analyze_message(state.analyzer.as_ref(), &req.previous);
    Json(build_analyze_message_response(&req.current, &current, &previous))
}

pub async fn analyze_drift(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeDriftRequest>,
) -> Result<Json<AnalyzeDriftResponse>, DriftError> {
    let dim = state.encoder.dimension();
    if req.current_embedding.len() != dim {
        return Err(DriftError::Request(RequestError::DimensionMismatch {
            expected: dim,
            actual: req.current_embedding.len(),
        }));
    }
    if req.branch_centroid.len() != dim {
        return Err(DriftError::Request(RequestError::DimensionMismatch {
            expected: dim,
            actual: req.branch_centroid.len(),
        }));
    }

    let result = compute_boost(
        &req.current,
        &req.previous,
        &req.current_embedding,
        &req.branch_centroid,
        state.analyzer.as_ref(),
    );

    let analysis = analyze_message_response_base(
        &req.current,
        &result.current_analysis,
        &result.previous_analysis,
    );

    Ok(Json(AnalyzeDriftResponse {
        raw_similarity: result.raw,
        boosted_similarity: result.boosted,
        boost_multiplier: result.multiplier,
        boosts_applied: result.rules_applied,
        analysis,
    }))
}

/// Shared guard used by handlers that require the encoder to be ready.
/// Not currently reachable: the encoder is loaded synchronously at startup
/// before the router is wired, but kept as the seam `EncoderError::NotLoaded`
/// maps through if a future lazy-loading backend needs it.
#[allow(dead_code)]
pub(crate) fn ensure_encoder_ready(ready: bool) -> Result<(), DriftError> {
    if ready {
        Ok(())
    } else {
        Err(DriftError::Encoder(EncoderError::NotLoaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rule_based::RuleAnalyzer;

    /// The anaphoric fallback regex ("the same", "it's", ...) only widens
    /// `/analyze-message`'s verdict; `/analyze-drift` reports the bare
    /// per-sentence flag, matching the Python original's per-endpoint split.
    #[test]
    fn analyze_drift_base_omits_anaphoric_fallback_analyze_message_applies_it() {
        let analyzer = RuleAnalyzer::new();
        let current_text = "The same applies.";
        let current = analyze_message(&analyzer, current_text);
        let previous = analyze_message(&analyzer, "We discussed the budget.");

        assert!(!current.has_anaphoric_ref);

        let drift_view = analyze_message_response_base(current_text, &current, &previous);
        assert!(!drift_view.current_has_anaphoric_ref);

        let message_view = build_analyze_message_response(current_text, &current, &previous);
        assert!(message_view.current_has_anaphoric_ref);
    }

    /// The topic-pivot fallback, by contrast, is shared by both endpoints.
    #[test]
    fn topic_pivot_fallback_applies_to_both_response_shapes() {
        let analyzer = RuleAnalyzer::new();
        let current_text = "Anyway, something else entirely.";
        let current = analyze_message(&analyzer, current_text);
        let previous = analyze_message(&analyzer, "We discussed the budget.");

        let drift_view = analyze_message_response_base(current_text, &current, &previous);
        let message_view = build_analyze_message_response(current_text, &current, &previous);

        assert!(drift_view.has_topic_return_signal);
        assert!(message_view.has_topic_return_signal);
    }
}
