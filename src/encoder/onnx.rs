//! ONNX sentence-transformer encoder (feature `neural-embeddings`).
//!
//! Loads a model and tokenizer once at startup from a cache directory and
//! never mutates either afterward. Built against `ort` 2.x's session API
//! (`Session::builder()?.commit_from_file()?`).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Value;
use tokenizers::Tokenizer;

use crate::error::EncoderError;

use super::Encoder;

/// Sentence-transformer encoder backed by an ONNX Runtime session.
///
/// `ort::session::Session` is `!Sync` in the general case (its internal
/// allocator arena is not safe for concurrent `run` calls), so inference is
/// serialized behind a [`Mutex`].
pub struct OnnxEncoder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dimension: usize,
    model_id: String,
}

impl OnnxEncoder {
    /// Load a model and tokenizer from the given cache directory. Expects
    /// `model.onnx` and `tokenizer.json` to already be present; this loader
    /// does not fetch them.
    pub fn load(cache_dir: &Path, model_id: &str, dimension: usize) -> Result<Self, EncoderError> {
        let model_path = cache_dir.join("model.onnx");
        let tokenizer_path = cache_dir.join("tokenizer.json");

        let session = Session::builder()
            .map_err(|e| EncoderError::InferenceFailed {
                message: format!("failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(&model_path)
            .map_err(|e| EncoderError::InferenceFailed {
                message: format!("failed to load model from {}: {e}", model_path.display()),
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            EncoderError::InferenceFailed {
                message: format!(
                    "failed to load tokenizer from {}: {e}",
                    tokenizer_path.display()
                ),
            }
        })?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimension,
            model_id: model_id.to_string(),
        })
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EncoderError::InferenceFailed {
                message: format!("tokenization failed: {e}"),
            })?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let seq_len = ids.len();

        let input_ids = Value::from_array(([1, seq_len], ids)).map_err(|e| {
            EncoderError::InferenceFailed {
                message: format!("failed to build input_ids tensor: {e}"),
            }
        })?;
        let attention_mask = Value::from_array(([1, seq_len], mask.clone())).map_err(|e| {
            EncoderError::InferenceFailed {
                message: format!("failed to build attention_mask tensor: {e}"),
            }
        })?;

        let mut session = self.session.lock().expect("onnx session mutex poisoned");
        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
            ])
            .map_err(|e| EncoderError::InferenceFailed {
                message: format!("inference failed: {e}"),
            })?;

        let (shape, hidden) = outputs[0]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| EncoderError::InferenceFailed {
                message: format!("failed to read model output: {e}"),
            })?;

        mean_pool(shape, hidden, &mask, self.dimension)
    }
}

/// Mean-pool token embeddings over non-padding positions, then L2-normalize.
/// `shape` is expected as `[1, seq_len, hidden_dim]`.
fn mean_pool(
    shape: &[i64],
    hidden: &[f32],
    mask: &[i64],
    expected_dim: usize,
) -> Result<Vec<f32>, EncoderError> {
    let hidden_dim = *shape.last().unwrap_or(&0) as usize;
    if hidden_dim != expected_dim {
        return Err(EncoderError::InferenceFailed {
            message: format!(
                "model output dimension {hidden_dim} does not match configured dimension {expected_dim}"
            ),
        });
    }

    let seq_len = mask.len();
    let mut pooled = vec![0f32; hidden_dim];
    let mut count = 0f32;
    for (t, &m) in mask.iter().enumerate().take(seq_len) {
        if m == 0 {
            continue;
        }
        count += 1.0;
        for d in 0..hidden_dim {
            pooled[d] += hidden[t * hidden_dim + d];
        }
    }
    if count > 0.0 {
        for v in pooled.iter_mut() {
            *v /= count;
        }
    }
    let norm = pooled.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in pooled.iter_mut() {
            *v /= norm;
        }
    }
    Ok(pooled)
}

impl Encoder for OnnxEncoder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
        texts.iter().map(|t| self.embed_one(t)).collect()
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_pool_ignores_padding_positions() {
        // seq_len = 2, hidden_dim = 2, second position masked out.
        let shape = [1, 2, 2];
        let hidden = [1.0, 1.0, 100.0, 100.0];
        let mask = [1, 0];
        let pooled = mean_pool(&shape, &hidden, &mask, 2).unwrap();
        // Only the unmasked position contributes, then L2-normalized.
        assert!((pooled[0] - pooled[1]).abs() < 1e-6);
        let norm: f32 = pooled.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mean_pool_rejects_dimension_mismatch() {
        let shape = [1, 2, 3];
        let hidden = [0.0; 6];
        let mask = [1, 1];
        let err = mean_pool(&shape, &hidden, &mask, 2).unwrap_err();
        assert!(matches!(err, EncoderError::InferenceFailed { .. }));
    }
}
