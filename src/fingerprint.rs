//! Deterministic fingerprints for compressed vectors.
//!
//! A compressed vector is canonicalized as its components serialized to
//! 32-bit little-endian floats, concatenated in order with no separators,
//! then digested with SHA-256 and rendered as lowercase hex. Byte-identical
//! vectors always produce the identical 64-character fingerprint; any
//! single-bit difference produces an unrelated one (avalanche property of
//! the digest).

use crate::error::{Error, Result};
use crate::Vector;
use sha2::{Digest, Sha256};

/// Canonical serializer + SHA-256 digest for compressed vectors.
pub struct FingerprintGenerator;

impl FingerprintGenerator {
    /// Canonical byte form: each component narrowed to f32, little-endian,
    /// concatenated in vector order.
    pub fn canonical_bytes(vector: &Vector) -> Result<Vec<u8>> {
        if vector.is_empty() {
            return Err(Error::InvalidInput(
                "Cannot fingerprint an empty vector".to_string(),
            ));
        }
        if let Some(position) = vector.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "Non-finite component at index {position}"
            )));
        }

        let mut bytes = Vec::with_capacity(vector.len() * 4);
        for &value in vector {
            bytes.extend_from_slice(&(value as f32).to_le_bytes());
        }
        Ok(bytes)
    }

    /// Lowercase hex SHA-256 of the canonical byte form.
    pub fn fingerprint(vector: &Vector) -> Result<String> {
        let bytes = Self::canonical_bytes(vector)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fingerprint_is_64_hex_chars() {
        let v = array![0.5, -1.25, 3.0];
        let fp = FingerprintGenerator::fingerprint(&v).unwrap();

        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_identical_vectors_identical_fingerprints() {
        let a = array![0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4];

        assert_eq!(
            FingerprintGenerator::fingerprint(&a).unwrap(),
            FingerprintGenerator::fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn test_single_component_difference_changes_fingerprint() {
        let a = array![0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.2, 0.3, 0.4000001];

        assert_ne!(
            FingerprintGenerator::fingerprint(&a).unwrap(),
            FingerprintGenerator::fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn test_canonical_bytes_little_endian_f32() {
        let v = array![1.0, -2.0];
        let bytes = FingerprintGenerator::canonical_bytes(&v).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        expected.extend_from_slice(&(-2.0f32).to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_vector_is_invalid() {
        let v = Vector::zeros(0);

        assert!(matches!(
            FingerprintGenerator::fingerprint(&v),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_component_is_invalid() {
        let v = array![1.0, f64::NAN, 2.0];

        assert!(matches!(
            FingerprintGenerator::fingerprint(&v),
            Err(Error::InvalidInput(_))
        ));
    }
}
