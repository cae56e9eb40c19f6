//! Embedding encoder capability.
//!
//! `Encoder` is the seam the drift pipeline calls to turn text into
//! fixed-dimension vectors. [`hashing::HashingEncoder`] is the deterministic
//! default, requiring no model download and no ML runtime; the
//! `neural-embeddings` feature adds [`onnx::OnnxEncoder`], grounded in
//! `kxrm-semisearch`'s `LocalEmbedder`, which wraps a real sentence
//! transformer via `ort` with exactly this kind of graceful fallback.

pub mod hashing;

#[cfg(feature = "neural-embeddings")]
pub mod onnx;

use crate::error::EncoderError;

/// Text-to-vector embedding capability.
pub trait Encoder: Send + Sync {
    /// Embedding dimensionality this encoder produces.
    fn dimension(&self) -> usize;

    /// Embed a single string.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        Ok(self.encode_batch(&[text])?.into_iter().next().unwrap_or_default())
    }

    /// Embed a batch of strings. Output order matches input order 1:1.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError>;

    /// A stable identifier for the active backend, surfaced on `/health`.
    fn model_id(&self) -> &str;
}
