//! End-to-end pipeline scenario: seeded 256-wide records compressed
//! 256 -> 128 -> 64 -> 32 and anchored as 64-character fingerprints.

use ledgerprint::synthetic::correlated_records;
use ledgerprint::{Pipeline, PipelineConfig};

fn anchor_config() -> PipelineConfig {
    PipelineConfig {
        pca_components: 128,
        latent_dim: 64,
        entropy_features: 32,
        hidden_dims: vec![128, 64],
        epochs: 5,
        learning_rate: 0.01,
        batch_size: 32,
        random_state: Some(42),
    }
}

#[test]
fn end_to_end_compression_and_fingerprint() {
    let train = correlated_records(200, 256, 42);
    let mut pipeline = Pipeline::new(anchor_config()).unwrap();
    pipeline.fit(&train).unwrap();

    let record_vec = correlated_records(1, 256, 7).row(0).to_owned();

    let compressed = pipeline.transform_vec(&record_vec).unwrap();
    assert_eq!(compressed.len(), 32);

    let record = pipeline.process_vec_for_blockchain(&record_vec).unwrap();
    assert_eq!(record.dimension, 32);
    assert_eq!(record.fingerprint.len(), 64);
    assert!(record.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));

    // The same fitted instance must reproduce the identical fingerprint.
    let again = pipeline.process_vec_for_blockchain(&record_vec).unwrap();
    assert_eq!(again.fingerprint, record.fingerprint);
    assert_eq!(again.compressed_vector, record.compressed_vector);
}

#[test]
fn batch_records_match_per_row_processing() {
    let train = correlated_records(120, 64, 11);
    let config = PipelineConfig {
        pca_components: 32,
        latent_dim: 16,
        entropy_features: 8,
        hidden_dims: vec![24],
        epochs: 4,
        random_state: Some(11),
        ..PipelineConfig::default()
    };

    let mut pipeline = Pipeline::new(config).unwrap();
    pipeline.fit(&train).unwrap();

    let batch = correlated_records(10, 64, 12);
    let records = pipeline.process_for_blockchain(&batch).unwrap();
    assert_eq!(records.len(), 10);

    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.dimension, 8);
        let single = pipeline
            .process_vec_for_blockchain(&batch.row(i).to_owned())
            .unwrap();
        assert_eq!(single, *record);
    }
}

#[test]
fn seeded_refit_reproduces_fingerprints() {
    let train = correlated_records(80, 48, 21);
    let config = PipelineConfig {
        pca_components: 24,
        latent_dim: 12,
        entropy_features: 6,
        hidden_dims: vec![16],
        epochs: 3,
        random_state: Some(99),
        ..PipelineConfig::default()
    };

    let probe = correlated_records(1, 48, 22).row(0).to_owned();

    let mut a = Pipeline::new(config.clone()).unwrap();
    a.fit(&train).unwrap();
    let mut b = Pipeline::new(config).unwrap();
    b.fit(&train).unwrap();

    assert_eq!(
        a.process_vec_for_blockchain(&probe).unwrap(),
        b.process_vec_for_blockchain(&probe).unwrap()
    );
}
