//! Compress high-dimensional numeric records into small fixed-size codes
//! and deterministic SHA-256 fingerprints suitable for anchoring in an
//! external immutable ledger.
//!
//! The reduction runs in three stages, each fitted on a training matrix
//! and frozen afterwards:
//!
//! 1. [`Pca`]: linear redundancy removal via principal-component projection
//! 2. [`Autoencoder`]: bounded non-linear compression to a latent code
//! 3. [`EntropySelector`]: information-theoretic pruning of latent columns
//!
//! [`Pipeline`] composes the stages (with a [`StandardScaler`] in front)
//! and [`FingerprintGenerator`] turns each compressed vector into a
//! 64-character hex digest. Identical inputs through the same fitted
//! pipeline always reproduce the identical digest, which is what a
//! downstream verifier relies on.
//!
//! ```rust
//! use ledgerprint::{Pipeline, PipelineConfig};
//! use ledgerprint::synthetic::correlated_records;
//!
//! let config = PipelineConfig {
//!     pca_components: 16,
//!     latent_dim: 8,
//!     entropy_features: 4,
//!     hidden_dims: vec![12],
//!     epochs: 5,
//!     random_state: Some(7),
//!     ..PipelineConfig::default()
//! };
//! let mut pipeline = Pipeline::new(config).unwrap();
//!
//! let records = correlated_records(60, 32, 42);
//! pipeline.fit(&records).unwrap();
//!
//! let record = pipeline.process_vec_for_blockchain(&records.row(0).to_owned()).unwrap();
//! assert_eq!(record.compressed_vector.len(), 4);
//! assert_eq!(record.fingerprint.len(), 64);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod autoencoder;
pub mod decomposition;
pub mod error;
pub mod feature_selection;
pub mod fingerprint;
pub mod pipeline;
pub mod preprocessing;
pub mod synthetic;

pub use autoencoder::Autoencoder;
pub use decomposition::Pca;
pub use error::{Error, Result};
pub use feature_selection::EntropySelector;
pub use fingerprint::FingerprintGenerator;
pub use pipeline::{CompressionStats, LedgerRecord, Pipeline, PipelineConfig};
pub use preprocessing::StandardScaler;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
