//! Non-linear compression via a symmetric dense autoencoder.
//!
//! The encoder tapers from the input width through configurable hidden
//! widths down to the latent width; the decoder mirrors the same widths
//! in reverse. Every layer applies tanh except the decoder's final layer,
//! which stays linear so reconstructions are not range-limited.
//!
//! Training is deliberately not backpropagation: each minibatch applies a
//! random perturbation to every weight matrix, scaled by the current
//! reconstruction loss and clipped to a fixed bound. The fitted weights
//! are frozen afterwards, which is all the downstream fingerprint
//! determinism depends on; no claim is made that the loss decreases.

use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::Axis;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Symmetric clip applied to every weight perturbation.
const PERTURBATION_CLIP: f64 = 0.1;

#[derive(Clone, Debug)]
struct Layer {
    weights: Matrix,
    biases: Vector,
}

/// Dense autoencoder with a bounded (tanh) encoder and a linear-output
/// decoder. Weights are created and trained by `train`; `encode` and
/// `decode` require a trained instance.
#[derive(Clone, Debug)]
pub struct Autoencoder {
    input_dim: usize,
    latent_dim: usize,
    hidden_dims: Vec<usize>,
    encoder: Option<Vec<Layer>>,
    decoder: Option<Vec<Layer>>,
    random_state: Option<u64>,
}

impl Autoencoder {
    pub fn new(input_dim: usize, latent_dim: usize) -> Self {
        Self {
            input_dim,
            latent_dim,
            hidden_dims: vec![128, 64],
            encoder: None,
            decoder: None,
            random_state: None,
        }
    }

    /// Interior widths of the encoder (mirrored by the decoder).
    pub fn hidden_dims(mut self, hidden_dims: Vec<usize>) -> Self {
        self.hidden_dims = hidden_dims;
        self
    }

    /// Seed for the per-instance generator used by initialization,
    /// shuffling and weight perturbation. Seeded instances train
    /// reproducibly without touching any process-wide state.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    /// Forward pass through the encoder chain.
    pub fn encode(&self, x: &Matrix) -> Result<Matrix> {
        let encoder = self.encoder.as_ref().ok_or(Error::NotFitted("Autoencoder"))?;

        if x.ncols() != self.input_dim {
            return Err(Error::DimensionMismatch {
                expected: self.input_dim,
                actual: x.ncols(),
            });
        }

        let mut activation = x.clone();
        for layer in encoder {
            activation = (activation.dot(&layer.weights) + &layer.biases).mapv(f64::tanh);
        }
        Ok(activation)
    }

    /// Forward pass through the decoder chain. The final layer is linear.
    pub fn decode(&self, z: &Matrix) -> Result<Matrix> {
        let decoder = self.decoder.as_ref().ok_or(Error::NotFitted("Autoencoder"))?;

        if z.ncols() != self.latent_dim {
            return Err(Error::DimensionMismatch {
                expected: self.latent_dim,
                actual: z.ncols(),
            });
        }

        let mut activation = z.clone();
        for (i, layer) in decoder.iter().enumerate() {
            activation = activation.dot(&layer.weights) + &layer.biases;
            if i < decoder.len() - 1 {
                activation = activation.mapv(f64::tanh);
            }
        }
        Ok(activation)
    }

    /// Train on `x`, returning the running average reconstruction loss per
    /// epoch for diagnostics.
    ///
    /// Per minibatch: full forward pass, mean-squared reconstruction
    /// error, then every encoder and decoder weight matrix moves by a
    /// random direction scaled by `learning_rate * loss` and clipped to
    /// ±0.1. This stochastic update is the contract; swapping in gradient
    /// descent would change the fitted weights' statistics and every
    /// fingerprint derived from them.
    pub fn train(
        &mut self,
        x: &Matrix,
        epochs: usize,
        learning_rate: f64,
        batch_size: usize,
    ) -> Result<Vec<f64>> {
        if x.ncols() != self.input_dim {
            return Err(Error::DimensionMismatch {
                expected: self.input_dim,
                actual: x.ncols(),
            });
        }
        if x.nrows() == 0 {
            return Err(Error::InvalidInput(
                "Training matrix must have at least one sample".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(Error::InvalidConfiguration(
                "batch_size must be > 0".to_string(),
            ));
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (mut encoder, mut decoder) = self.initialize_layers(&mut rng);

        let n_samples = x.nrows();
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut epoch_losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            indices.shuffle(&mut rng);

            let mut total_loss = 0.0;
            let mut n_batches = 0usize;

            for batch_indices in indices.chunks(batch_size) {
                let batch = x.select(Axis(0), batch_indices);

                let encoded = forward_encoder(&encoder, &batch);
                let decoded = forward_decoder(&decoder, &encoded);

                let diff = &batch - &decoded;
                let loss = diff.mapv(|d| d * d).mean().unwrap_or(0.0);
                total_loss += loss;
                n_batches += 1;

                let scale = learning_rate * loss;
                for layer in encoder.iter_mut().chain(decoder.iter_mut()) {
                    let step = Matrix::random_using(layer.weights.raw_dim(), StandardNormal, &mut rng)
                        * scale;
                    layer.weights -= &step.mapv(|s| s.clamp(-PERTURBATION_CLIP, PERTURBATION_CLIP));
                }
            }

            let avg_loss = total_loss / n_batches.max(1) as f64;
            epoch_losses.push(avg_loss);
            log::debug!(
                "autoencoder epoch {}/{}: avg reconstruction loss {:.6}",
                epoch + 1,
                epochs,
                avg_loss
            );
        }

        self.encoder = Some(encoder);
        self.decoder = Some(decoder);
        Ok(epoch_losses)
    }

    /// Fresh weight stack: N(0, 1) entries scaled by sqrt(2 / fan_in),
    /// zero biases. The decoder mirrors the encoder widths in reverse.
    fn initialize_layers(&self, rng: &mut StdRng) -> (Vec<Layer>, Vec<Layer>) {
        let mut encoder_dims = vec![self.input_dim];
        encoder_dims.extend(&self.hidden_dims);
        encoder_dims.push(self.latent_dim);

        let mut decoder_dims = vec![self.latent_dim];
        decoder_dims.extend(self.hidden_dims.iter().rev());
        decoder_dims.push(self.input_dim);

        let build = |dims: &[usize], rng: &mut StdRng| -> Vec<Layer> {
            dims.windows(2)
                .map(|pair| {
                    let (fan_in, fan_out) = (pair[0], pair[1]);
                    let scale = (2.0 / fan_in as f64).sqrt();
                    Layer {
                        weights: Matrix::random_using((fan_in, fan_out), StandardNormal, rng)
                            * scale,
                        biases: Vector::zeros(fan_out),
                    }
                })
                .collect()
        };

        let encoder = build(&encoder_dims, rng);
        let decoder = build(&decoder_dims, rng);
        (encoder, decoder)
    }
}

fn forward_encoder(encoder: &[Layer], x: &Matrix) -> Matrix {
    let mut activation = x.clone();
    for layer in encoder {
        activation = (activation.dot(&layer.weights) + &layer.biases).mapv(f64::tanh);
    }
    activation
}

fn forward_decoder(decoder: &[Layer], z: &Matrix) -> Matrix {
    let mut activation = z.clone();
    for (i, layer) in decoder.iter().enumerate() {
        activation = activation.dot(&layer.weights) + &layer.biases;
        if i < decoder.len() - 1 {
            activation = activation.mapv(f64::tanh);
        }
    }
    activation
}
