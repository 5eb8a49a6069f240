use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Standard deviations below this floor are clamped before division so
/// constant feature columns standardize to zero instead of dividing by zero.
const STD_FLOOR: f64 = 1e-8;

/// Per-feature zero-mean/unit-variance standardization.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::InvalidInput(
                "Input matrix must have at least one sample and one feature".to_string(),
            ));
        }

        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or_else(|| Error::InvalidInput("Failed to compute mean".to_string()))?;
        let std = data
            .std_axis(ndarray::Axis(0), 0.0)
            .mapv(|s| s.max(STD_FLOOR));

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let mean = self
            .mean
            .as_ref()
            .ok_or(Error::NotFitted("StandardScaler"))?;
        let std = self.std.as_ref().ok_or(Error::NotFitted("StandardScaler"))?;

        if data.ncols() != mean.len() {
            return Err(Error::DimensionMismatch {
                expected: mean.len(),
                actual: data.ncols(),
            });
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Width of the training data, once fitted.
    pub fn n_features(&self) -> Option<usize> {
        self.mean.as_ref().map(|m| m.len())
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
