//! Deterministic hashing encoder.
//!
//! Default `Encoder` backend: no model weights, no download, no ML runtime.
//! Maps each whitespace token to a bucket via FNV-1a feature hashing, signs
//! its contribution from a second hash bit (the standard "hashing trick" for
//! collision-tolerant bag-of-words vectors), and L2-normalizes. Deterministic
//! across runs and processes, which is what lets `tests/drift_pipeline.rs`
//! assert exact similarity values without a model file.

use rayon::prelude::*;

use crate::error::EncoderError;

use super::Encoder;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic bag-of-words hashing encoder.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimension: usize,
}

impl HashingEncoder {
    /// `dimension` should match whatever downstream vectors (branch
    /// centroids) this encoder's output is compared against. Defaults to
    /// 384, the MiniLM-family dimension the Python original ships.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0f32; self.dimension];
        for token in text.split_whitespace() {
            let lower = token.to_lowercase();
            let h = fnv1a(lower.as_bytes());
            let bucket = (h % self.dimension as u64) as usize;
            let sign = if (h >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign;
        }
        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in vec.iter_mut() {
                *v /= norm;
            }
        }
        vec
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Encoder for HashingEncoder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
        Ok(texts.par_iter().map(|t| self.embed_one(t)).collect())
    }

    fn model_id(&self) -> &str {
        "hashing-fnv1a"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_yields_identical_vector() {
        let enc = HashingEncoder::default();
        let a = enc.encode("kitchen renovation budget").unwrap();
        let b = enc.encode("kitchen renovation budget").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn output_is_l2_normalized() {
        let enc = HashingEncoder::default();
        let v = enc.encode("kitchen renovation budget planning").unwrap();
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4 || norm == 0.0);
    }

    #[test]
    fn dimension_matches_configured_value() {
        let enc = HashingEncoder::new(128);
        assert_eq!(enc.dimension(), 128);
        assert_eq!(enc.encode("hello world").unwrap().len(), 128);
    }

    #[test]
    fn batch_preserves_order() {
        let enc = HashingEncoder::default();
        let out = enc.encode_batch(&["alpha", "beta", "gamma"]).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], enc.encode("alpha").unwrap());
        assert_eq!(out[2], enc.encode("gamma").unwrap());
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let enc = HashingEncoder::default();
        let v = enc.encode("").unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
