//! Request and response contracts for the HTTP surface.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Accepts either a single string or a list of strings — `/embed` and
/// `/preprocess` both take this shape so a caller can batch without a
/// separate endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    One(String),
    Many(Vec<String>),
}

impl TextOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TextOrList::One(s) => vec![s],
            TextOrList::Many(v) => v,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub device: String,
    pub dimension: usize,
}

#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    pub text: TextOrList,
    #[serde(default = "default_true")]
    pub preprocess: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub dimension: usize,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_texts: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PreprocessRequest {
    pub text: TextOrList,
}

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    pub original: Vec<String>,
    pub preprocessed: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub text1: String,
    pub text2: String,
    #[serde(default = "default_true")]
    pub preprocess: bool,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity: f32,
    pub adjusted_similarity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_text1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_text2: Option<String>,
}

fn default_stay_threshold() -> f32 {
    crate::config::DEFAULT_STAY_THRESHOLD
}
fn default_branch_threshold() -> f32 {
    crate::config::DEFAULT_BRANCH_THRESHOLD
}

#[derive(Debug, Deserialize)]
pub struct DriftRequest {
    pub anchor: String,
    pub message: String,
    #[serde(default = "default_true")]
    pub preprocess: bool,
    #[serde(default = "default_stay_threshold")]
    pub stay_threshold: f32,
    #[serde(default = "default_branch_threshold")]
    pub branch_threshold: f32,
}

#[derive(Debug, Serialize)]
pub struct DriftResponse {
    pub similarity: f32,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntityOverlapRequest {
    pub text1: String,
    pub text2: String,
}

#[derive(Debug, Serialize)]
pub struct EntityOverlapResponse {
    pub has_overlap: bool,
    pub overlap_score: f32,
    pub shared_entities: Vec<String>,
    pub text1_entities: Vec<String>,
    pub text2_entities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeMessageRequest {
    pub current: String,
    pub previous: String,
}

#[derive(Debug, Serialize)]
pub struct EntityOverlapSummary {
    pub has_overlap: bool,
    pub overlap_score: f32,
    pub shared_entities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeMessageResponse {
    pub current_is_question: bool,
    pub previous_is_question: bool,
    pub current_has_anaphoric_ref: bool,
    pub has_topic_return_signal: bool,
    pub has_preference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_entity: Option<String>,
    pub entity_overlap: EntityOverlapSummary,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeDriftRequest {
    pub current: String,
    pub previous: String,
    pub current_embedding: Vec<f32>,
    pub branch_centroid: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeDriftResponse {
    pub raw_similarity: f32,
    pub boosted_similarity: f32,
    pub boost_multiplier: f32,
    pub boosts_applied: Vec<String>,
    pub analysis: AnalyzeMessageResponse,
}
