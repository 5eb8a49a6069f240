//! Information-theoretic pruning of latent columns.
//!
//! Each column is discretized into a density-normalized histogram and
//! scored by base-2 Shannon entropy; the top-k columns by entropy survive.
//! `transform` emits the surviving columns in selection order (descending
//! entropy, ties broken by ascending index) rather than original column
//! order — downstream fingerprinting depends on that ordering.

use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, Axis};
use std::cmp::Ordering;

/// Additive epsilon inside the logarithm; keeps log2 defined on bins whose
/// density underflows to zero.
const LOG_EPSILON: f64 = 1e-10;

/// Ranks columns by estimated Shannon entropy and keeps the top k.
#[derive(Clone, Debug)]
pub struct EntropySelector {
    pub selected_indices: Option<Vec<usize>>,
    pub entropies: Option<Vector>,
    n_features: usize,
    n_bins: usize,
    n_input_features: Option<usize>,
}

impl EntropySelector {
    /// `n_features` is the number of columns to keep (k).
    pub fn new(n_features: usize) -> Self {
        Self {
            selected_indices: None,
            entropies: None,
            n_features,
            n_bins: 20,
            n_input_features: None,
        }
    }

    /// Histogram resolution used for the entropy estimate.
    pub fn n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if self.n_features == 0 {
            return Err(Error::InvalidConfiguration(
                "n_features must be > 0".to_string(),
            ));
        }
        if self.n_features > x.ncols() {
            return Err(Error::InvalidConfiguration(format!(
                "n_features={} cannot be larger than the number of input columns ({})",
                self.n_features,
                x.ncols()
            )));
        }
        if x.nrows() == 0 {
            return Err(Error::InvalidInput(
                "Input matrix must have at least one sample".to_string(),
            ));
        }

        let entropies: Vector = x
            .axis_iter(Axis(1))
            .map(|column| column_entropy(&column, self.n_bins))
            .collect::<Vec<f64>>()
            .into();

        // Descending entropy; equal entropies keep ascending column order.
        let mut ranked: Vec<usize> = (0..x.ncols()).collect();
        ranked.sort_by(|&i, &j| {
            entropies[j]
                .partial_cmp(&entropies[i])
                .unwrap_or(Ordering::Equal)
                .then(i.cmp(&j))
        });
        ranked.truncate(self.n_features);

        self.selected_indices = Some(ranked);
        self.entropies = Some(entropies);
        self.n_input_features = Some(x.ncols());
        Ok(())
    }

    /// Selected columns of `x`, reordered into selection order.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let indices = self
            .selected_indices
            .as_ref()
            .ok_or(Error::NotFitted("EntropySelector"))?;
        let n_input = self
            .n_input_features
            .ok_or(Error::NotFitted("EntropySelector"))?;

        if x.ncols() != n_input {
            return Err(Error::DimensionMismatch {
                expected: n_input,
                actual: x.ncols(),
            });
        }

        Ok(x.select(Axis(1), indices))
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Base-2 Shannon entropy of a column after discretization into a
/// density-normalized equal-width histogram. A constant column occupies a
/// single bin and scores (approximately) zero, a valid rank value.
fn column_entropy(column: &ArrayView1<f64>, n_bins: usize) -> f64 {
    let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / n_bins as f64;

    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }

    let mut counts = vec![0usize; n_bins];
    for &value in column {
        let mut bin = ((value - min) / width) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        counts[bin] += 1;
    }

    let norm = column.len() as f64 * width;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let density = count as f64 / norm;
            -density * (density + LOG_EPSILON).log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_selects_exactly_k_unique_indices() {
        let x = array![
            [0.1, 5.0, 0.0, -2.0],
            [0.9, 5.1, 0.0, 3.0],
            [0.2, 4.9, 0.0, -1.0],
            [0.8, 5.2, 0.0, 2.0],
            [0.5, 5.0, 0.0, 0.5]
        ];

        let mut selector = EntropySelector::new(2);
        selector.fit(&x).unwrap();

        let indices = selector.selected_indices.as_ref().unwrap();
        assert_eq!(indices.len(), 2);
        assert_ne!(indices[0], indices[1]);
    }

    #[test]
    fn test_selection_ordered_by_descending_entropy() {
        let x = array![
            [1.0, 0.0, 3.0],
            [2.0, 0.0, -1.0],
            [1.5, 0.0, 7.0],
            [2.5, 0.0, -4.0],
            [1.2, 0.0, 2.0],
            [2.2, 0.0, -6.0]
        ];

        let mut selector = EntropySelector::new(3);
        selector.fit(&x).unwrap();

        let indices = selector.selected_indices.as_ref().unwrap();
        let entropies = selector.entropies.as_ref().unwrap();
        for pair in indices.windows(2) {
            assert!(entropies[pair[0]] >= entropies[pair[1]]);
        }
        // Wide spread beats constant beats narrow spread: density-normalized
        // histograms score tightly packed columns below zero.
        assert_eq!(indices, &vec![2, 1, 0]);
    }

    #[test]
    fn test_transform_reorders_columns_into_selection_order() {
        let x = array![
            [10.0, 0.0],
            [10.0, 10.0],
            [10.0, 20.0],
            [10.0, 30.0],
            [10.0, 40.0]
        ];

        // Column 1 spreads widely, column 0 is constant: selection order is
        // [1, 0], and transform must emit the columns in that order.
        let mut selector = EntropySelector::new(2);
        let transformed = selector.fit_transform(&x).unwrap();

        assert_eq!(selector.selected_indices.as_ref().unwrap(), &vec![1, 0]);
        assert_eq!(
            transformed.column(0).to_vec(),
            vec![0.0, 10.0, 20.0, 30.0, 40.0]
        );
        assert!(transformed.column(1).iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_constant_column_yields_zero_entropy() {
        let x = array![[3.0], [3.0], [3.0], [3.0]];

        let mut selector = EntropySelector::new(1);
        selector.fit(&x).unwrap();

        let entropies = selector.entropies.as_ref().unwrap();
        assert!(entropies[0].abs() < 1e-9);
        // Zero entropy is a rank value, not an error.
        assert_eq!(selector.selected_indices.as_ref().unwrap(), &vec![0]);
    }

    #[test]
    fn test_ties_break_by_ascending_index() {
        // Identical columns tie exactly; order must follow original index.
        let x = array![
            [1.0, 1.0, 1.0],
            [2.0, 2.0, 2.0],
            [3.0, 3.0, 3.0],
            [4.0, 4.0, 4.0]
        ];

        let mut selector = EntropySelector::new(3);
        selector.fit(&x).unwrap();

        assert_eq!(selector.selected_indices.as_ref().unwrap(), &vec![0, 1, 2]);
    }

    #[test]
    fn test_k_larger_than_columns_is_invalid() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];

        let mut selector = EntropySelector::new(5);
        assert!(matches!(
            selector.fit(&x),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_k_is_invalid() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];

        let mut selector = EntropySelector::new(0);
        assert!(matches!(
            selector.fit(&x),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_transform_without_fit() {
        let x = array![[1.0, 2.0]];
        let selector = EntropySelector::new(1);

        assert_eq!(
            selector.transform(&x),
            Err(Error::NotFitted("EntropySelector"))
        );
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let train = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let test = array![[1.0, 2.0]];

        let mut selector = EntropySelector::new(2);
        selector.fit(&train).unwrap();

        assert_eq!(
            selector.transform(&test),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }
}
