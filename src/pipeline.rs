//! Fixed four-stage compression pipeline and its ledger-facing entry
//! points.
//!
//! Stage order is part of the contract: standardize, project onto
//! principal components, encode to the latent code, prune to the
//! highest-entropy latent columns. `fit` learns every stage in that order
//! on a training matrix; `transform` replays the frozen stages. The
//! ledger entry points attach a deterministic SHA-256 fingerprint to each
//! compressed row.

use crate::autoencoder::Autoencoder;
use crate::decomposition::Pca;
use crate::error::{Error, Result};
use crate::feature_selection::EntropySelector;
use crate::fingerprint::FingerprintGenerator;
use crate::preprocessing::StandardScaler;
use crate::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Pipeline`]. Validated eagerly by
/// [`Pipeline::new`]; invalid combinations never reach data.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Output width of the linear stage. Clamped to the training data's
    /// rank bound at fit time if it exceeds it.
    pub pca_components: usize,
    /// Output width of the non-linear stage; must be < `pca_components`.
    pub latent_dim: usize,
    /// Final output width; must be ≤ `latent_dim`.
    pub entropy_features: usize,
    /// Interior widths of the encoder (mirrored by the decoder).
    pub hidden_dims: Vec<usize>,
    /// Autoencoder training epochs.
    pub epochs: usize,
    /// Autoencoder perturbation scale factor.
    pub learning_rate: f64,
    /// Autoencoder minibatch size.
    pub batch_size: usize,
    /// Seed for the pipeline-owned random generator. `None` draws from
    /// entropy; fitting is then not reproducible.
    pub random_state: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pca_components: 128,
            latent_dim: 64,
            entropy_features: 32,
            hidden_dims: vec![128, 64],
            epochs: 100,
            learning_rate: 0.01,
            batch_size: 32,
            random_state: None,
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if self.pca_components == 0 {
            return Err(Error::InvalidConfiguration(
                "pca_components must be > 0".to_string(),
            ));
        }
        if self.latent_dim == 0 {
            return Err(Error::InvalidConfiguration(
                "latent_dim must be > 0".to_string(),
            ));
        }
        if self.entropy_features == 0 {
            return Err(Error::InvalidConfiguration(
                "entropy_features must be > 0".to_string(),
            ));
        }
        if self.latent_dim >= self.pca_components {
            return Err(Error::InvalidConfiguration(format!(
                "latent_dim ({}) must be less than pca_components ({})",
                self.latent_dim, self.pca_components
            )));
        }
        if self.entropy_features > self.latent_dim {
            return Err(Error::InvalidConfiguration(format!(
                "entropy_features ({}) cannot be larger than latent_dim ({})",
                self.entropy_features, self.latent_dim
            )));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfiguration(
                "epochs must be > 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfiguration(
                "batch_size must be > 0".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::InvalidConfiguration(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// One ledger-ready record: the compressed vector, its width, and the
/// deterministic fingerprint a verifier re-derives for equality checks.
/// The downstream ledger consumes this structure verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub compressed_vector: Vec<f64>,
    pub dimension: usize,
    pub fingerprint: String,
}

/// Per-stage summary of a fitted pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct CompressionStats {
    pub input_dim: usize,
    pub pca_output_dim: usize,
    pub pca_explained_variance: f64,
    pub latent_dim: usize,
    pub selected_indices: Vec<usize>,
    pub final_dim: usize,
}

/// The composed four-stage reduction plus fingerprinting.
///
/// Learned parameters are an immutable snapshot owned by the instance:
/// `transform` and the ledger entry points take `&self` and may run
/// concurrently; refitting replaces every stage wholesale via `&mut self`.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    scaler: StandardScaler,
    pca: Pca,
    autoencoder: Autoencoder,
    selector: EntropySelector,
    fitted: bool,
}

impl Pipeline {
    /// Validates the configuration eagerly; no data is touched on error.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let autoencoder = Autoencoder::new(config.pca_components, config.latent_dim);
        let selector = EntropySelector::new(config.entropy_features);
        Ok(Self {
            config,
            scaler: StandardScaler::new(),
            pca: Pca::new(),
            autoencoder,
            selector,
            fitted: false,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit all four stages in order on `x`, each stage consuming the
    /// previous stage's transformed output. The pipeline counts as fitted
    /// only once every stage has succeeded; a failed fit leaves the
    /// previous fitted state discarded.
    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        self.fitted = false;

        log::debug!(
            "pipeline fit: {} samples x {} features",
            x.nrows(),
            x.ncols()
        );

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(x)?;

        let mut pca = Pca::new().n_components(self.config.pca_components);
        let reduced = pca.fit_transform(&scaled)?;
        let pca_dim = pca
            .n_components_fitted()
            .ok_or(Error::NotFitted("Pca"))?;
        log::debug!(
            "linear stage: {} -> {} (explained variance {:.4})",
            x.ncols(),
            pca_dim,
            pca.explained_variance_ratio
                .as_ref()
                .map(|r| r.sum())
                .unwrap_or(0.0)
        );

        // The clamp can undercut the configured latent width; surface that
        // as a configuration problem rather than training a widening stage.
        if pca_dim <= self.config.latent_dim {
            return Err(Error::InvalidConfiguration(format!(
                "latent_dim ({}) must be less than the fitted pca_components ({}, clamped from {})",
                self.config.latent_dim, pca_dim, self.config.pca_components
            )));
        }

        let mut autoencoder = Autoencoder::new(pca_dim, self.config.latent_dim)
            .hidden_dims(self.config.hidden_dims.clone());
        if let Some(seed) = self.config.random_state {
            autoencoder = autoencoder.random_state(seed);
        }
        autoencoder.train(
            &reduced,
            self.config.epochs,
            self.config.learning_rate,
            self.config.batch_size,
        )?;
        let latent = autoencoder.encode(&reduced)?;
        log::debug!("nonlinear stage: {} -> {}", pca_dim, self.config.latent_dim);

        let mut selector = EntropySelector::new(self.config.entropy_features);
        selector.fit(&latent)?;
        log::debug!(
            "entropy stage: {} -> {}",
            self.config.latent_dim,
            self.config.entropy_features
        );

        self.scaler = scaler;
        self.pca = pca;
        self.autoencoder = autoencoder;
        self.selector = selector;
        self.fitted = true;
        Ok(())
    }

    /// Replay the fit-time transforms on a batch. Output width is always
    /// exactly `entropy_features`.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        if !self.fitted {
            return Err(Error::NotFitted("Pipeline"));
        }

        let scaled = self.scaler.transform(x)?;
        let reduced = self.pca.transform(&scaled)?;
        let latent = self.autoencoder.encode(&reduced)?;
        self.selector.transform(&latent)
    }

    /// Single-vector variant of [`Pipeline::transform`].
    pub fn transform_vec(&self, x: &Vector) -> Result<Vector> {
        let batch = x.view().insert_axis(ndarray::Axis(0)).to_owned();
        let compressed = self.transform(&batch)?;
        Ok(compressed.row(0).to_owned())
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Compress a batch and fingerprint every row. Records come back in
    /// input row order, one per row.
    pub fn process_for_blockchain(&self, x: &Matrix) -> Result<Vec<LedgerRecord>> {
        let compressed = self.transform(x)?;

        compressed
            .axis_iter(ndarray::Axis(0))
            .map(|row| {
                let vector = row.to_owned();
                let fingerprint = FingerprintGenerator::fingerprint(&vector)?;
                Ok(LedgerRecord {
                    dimension: vector.len(),
                    compressed_vector: vector.to_vec(),
                    fingerprint,
                })
            })
            .collect()
    }

    /// Compress and fingerprint a single vector. The unwrapped return
    /// shape (one record, not a one-element batch) is deliberate API,
    /// matching how single records are anchored.
    pub fn process_vec_for_blockchain(&self, x: &Vector) -> Result<LedgerRecord> {
        let compressed = self.transform_vec(x)?;
        let fingerprint = FingerprintGenerator::fingerprint(&compressed)?;
        Ok(LedgerRecord {
            dimension: compressed.len(),
            compressed_vector: compressed.to_vec(),
            fingerprint,
        })
    }

    /// Per-stage widths and diagnostics of the fitted pipeline.
    pub fn compression_stats(&self) -> Result<CompressionStats> {
        if !self.fitted {
            return Err(Error::NotFitted("Pipeline"));
        }

        let input_dim = self
            .scaler
            .n_features()
            .ok_or(Error::NotFitted("StandardScaler"))?;
        let pca_output_dim = self
            .pca
            .n_components_fitted()
            .ok_or(Error::NotFitted("Pca"))?;
        let pca_explained_variance = self
            .pca
            .explained_variance_ratio
            .as_ref()
            .map(|r| r.sum())
            .unwrap_or(0.0);
        let selected_indices = self
            .selector
            .selected_indices
            .clone()
            .ok_or(Error::NotFitted("EntropySelector"))?;

        Ok(CompressionStats {
            input_dim,
            pca_output_dim,
            pca_explained_variance,
            latent_dim: self.config.latent_dim,
            final_dim: selected_indices.len(),
            selected_indices,
        })
    }
}
