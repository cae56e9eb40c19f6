//! # drift-core
//!
//! Conversation drift analysis: given a user's current utterance and the
//! prior conversational anchor (or a branch centroid vector), decide whether
//! the new utterance continues the same topic, drifts into a related
//! subtopic, or pivots to something new.
//!
//! ## Architecture
//!
//! - **Analyzer capability** (`analyzer`): tokens, POS, lemma, dependency
//!   relation, named entities, noun chunks, sentence segmentation. A
//!   rule-based implementation ships by default; anything satisfying the
//!   `Analyzer` trait is substitutable.
//! - **Encoder capability** (`encoder`): text → fixed-dimension embedding
//!   vectors. A deterministic hashing encoder ships by default; the
//!   `neural-embeddings` feature swaps in an ONNX sentence-transformer.
//! - **Preprocessor** (`preprocess`): normalizes text into a lemma stream
//!   tuned for the encoder.
//! - **Entity extractor** (`entities`): weighted entity sets from NER spans,
//!   bare nouns, and noun chunks.
//! - **Message analyzer** (`message`): per-sentence and per-message
//!   linguistic verdicts (question, anaphora, preference, topic pivot).
//! - **Overlap scorer** (`overlap`): weighted entity overlap between two
//!   analyzed messages.
//! - **Boost engine** (`boost`): composes raw cosine similarity with
//!   linguistic features into a calibrated drift score.
//! - **HTTP surface** (`http`): the request/response contracts exposing all
//!   of the above.
//!
//! ## Library usage
//!
//! ```no_run
//! use drift_core::analyzer::rule_based::RuleAnalyzer;
//! use drift_core::preprocess::preprocess;
//!
//! let analyzer = RuleAnalyzer::new();
//! let cleaned = preprocess("Could you please tell me about the kitchen renovation?", &analyzer);
//! assert!(cleaned.contains("kitchen"));
//! ```

pub mod analyzer;
pub mod boost;
pub mod config;
pub mod encoder;
pub mod entities;
pub mod error;
pub mod http;
pub mod logging;
pub mod message;
pub mod overlap;
pub mod paths;
pub mod preprocess;
