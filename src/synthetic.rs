//! Seeded synthetic record matrices for demos and tests.

use crate::Matrix;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Gaussian record matrix with correlated structure: every tenth column
/// pair is mixed 0.8/0.2 so the linear stage has redundancy to remove.
pub fn correlated_records(n_samples: usize, n_features: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Matrix::random_using((n_samples, n_features), StandardNormal, &mut rng);

    let mut i = 0;
    while i + 1 < n_features {
        let noise = Matrix::random_using((n_samples, 1), StandardNormal, &mut rng);
        let correlated = &data.column(i) * 0.8 + &noise.column(0) * 0.2;
        data.column_mut(i + 1).assign(&correlated);
        i += 10;
    }

    data
}
