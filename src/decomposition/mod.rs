//! Linear dimensionality reduction.
//!
//! `Pca` performs principal-component projection: it learns the directions
//! of maximum variance in the training data and projects inputs onto the
//! top components, recording how much variance each retained direction
//! explains.
//!
//! ```rust
//! use ledgerprint::Pca;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 2.0, 3.0],
//!     [4.0, 5.0, 6.0],
//!     [7.0, 8.0, 9.0]
//! ];
//!
//! let mut pca = Pca::new().n_components(2);
//! let transformed = pca.fit_transform(&x).unwrap();
//! assert_eq!(transformed.ncols(), 2);
//! ```

mod pca;

pub use pca::Pca;
