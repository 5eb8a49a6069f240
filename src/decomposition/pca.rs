use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use std::cmp::Ordering;

/// Principal Component Analysis via covariance eigendecomposition.
///
/// Components are learned once by `fit` and frozen; `transform` projects
/// centered input onto them. If the requested component count exceeds
/// `min(n_samples, n_features)` it is clamped to that bound rather than
/// rejected; the effective width is reported by `n_components_fitted`.
/// This clamping is part of the contract, not a solver side effect.
#[derive(Clone, Debug)]
pub struct Pca {
    pub components: Option<Matrix>,
    pub explained_variance: Option<Vector>,
    pub explained_variance_ratio: Option<Vector>,
    pub mean: Option<Vector>,
    n_components: Option<usize>,
    n_components_fitted: Option<usize>,
}

impl Pca {
    pub fn new() -> Self {
        Self {
            components: None,
            explained_variance: None,
            explained_variance_ratio: None,
            mean: None,
            n_components: None,
            n_components_fitted: None,
        }
    }

    /// Requested output width. Clamped at fit time to
    /// `min(n_samples, n_features)` when the data cannot support it.
    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = Some(n_components);
        self
    }

    /// Effective output width after fitting (requested width, possibly
    /// clamped to the data's available rank bound).
    pub fn n_components_fitted(&self) -> Option<usize> {
        self.n_components_fitted
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(Error::InvalidInput(
                "Input matrix must have at least one sample and one feature".to_string(),
            ));
        }

        let n_samples = x.nrows();
        let n_features = x.ncols();

        // Clamp to the data's rank bound instead of rejecting.
        let max_rank = n_features.min(n_samples);
        let n_components = self.n_components.unwrap_or(max_rank).min(max_rank);

        let mean = x
            .mean_axis(ndarray::Axis(0))
            .ok_or_else(|| Error::InvalidInput("Failed to compute mean".to_string()))?;
        let x_centered = x - &mean.view().insert_axis(ndarray::Axis(0));

        let denom = if n_samples > 1 {
            (n_samples - 1) as f64
        } else {
            1.0
        };
        let cov = x_centered.t().dot(&x_centered) / denom;

        let (eigenvalues, eigenvectors) = eigen_decomposition(&cov);

        // Sort eigenpairs by descending eigenvalue and keep the top ones.
        let mut eigen_pairs: Vec<(f64, Vector)> = eigenvalues
            .iter()
            .zip(eigenvectors.axis_iter(ndarray::Axis(1)))
            .map(|(&val, vec)| (val, vec.to_owned()))
            .collect();
        eigen_pairs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let explained_variance: Vector = eigen_pairs
            .iter()
            .take(n_components)
            .map(|(val, _)| val.max(0.0))
            .collect::<Vec<f64>>()
            .into();

        let mut components = Matrix::zeros((n_components, n_features));
        for (i, (_, eigenvec)) in eigen_pairs.iter().take(n_components).enumerate() {
            components.row_mut(i).assign(eigenvec);
        }

        // Ratio is relative to the total variance of all directions.
        let total_variance: f64 = eigen_pairs.iter().map(|(val, _)| val.max(0.0)).sum();
        let explained_variance_ratio = if total_variance > 0.0 {
            &explained_variance / total_variance
        } else {
            Vector::zeros(explained_variance.len())
        };

        self.components = Some(components);
        self.explained_variance = Some(explained_variance);
        self.explained_variance_ratio = Some(explained_variance_ratio);
        self.mean = Some(mean);
        self.n_components_fitted = Some(n_components);

        Ok(())
    }

    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let components = self.components.as_ref().ok_or(Error::NotFitted("Pca"))?;
        let mean = self.mean.as_ref().ok_or(Error::NotFitted("Pca"))?;

        if x.ncols() != mean.len() {
            return Err(Error::DimensionMismatch {
                expected: mean.len(),
                actual: x.ncols(),
            });
        }

        let x_centered = x - &mean.view().insert_axis(ndarray::Axis(0));
        Ok(x_centered.dot(&components.t()))
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

/// Eigendecomposition of a symmetric matrix by power iteration with
/// deflation. Returns eigenvalues and the matrix whose columns are the
/// corresponding eigenvectors.
fn eigen_decomposition(matrix: &Matrix) -> (Vector, Matrix) {
    let n = matrix.nrows();
    let mut eigenvalues = Vector::zeros(n);
    let mut eigenvectors = Matrix::zeros((n, n));

    let mut a = matrix.clone();

    for i in 0..n {
        let mut v = Vector::ones(n);
        let mut lambda = 0.0;

        for _ in 0..100 {
            let av = a.dot(&v);
            let norm = av.mapv(|x| x * x).sum().sqrt();

            if norm < 1e-10 {
                break;
            }

            v = av / norm;
            let new_lambda = v.dot(&a.dot(&v));

            if (new_lambda - lambda).abs() < 1e-10 {
                lambda = new_lambda;
                break;
            }
            lambda = new_lambda;
        }

        eigenvalues[i] = lambda;
        eigenvectors.column_mut(i).assign(&v);

        // Deflation: remove the found direction before the next iteration.
        if lambda.abs() > 1e-10 {
            let vv = v
                .view()
                .insert_axis(ndarray::Axis(1))
                .dot(&v.view().insert_axis(ndarray::Axis(0)));
            a = &a - &(vv * lambda);
        }
    }

    (eigenvalues, eigenvectors)
}
