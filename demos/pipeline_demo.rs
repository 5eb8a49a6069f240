use ledgerprint::synthetic::correlated_records;
use ledgerprint::{Pipeline, PipelineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Vector Compression for Ledger Anchoring ===\n");

    // Synthetic stand-in for extracted records: 256 features per record,
    // with correlated structure for the linear stage to exploit.
    let train = correlated_records(200, 256, 42);
    let holdout = correlated_records(50, 256, 43);

    println!("Training records: {}", train.nrows());
    println!("Original dimension: {}\n", train.ncols());

    let config = PipelineConfig {
        pca_components: 128,
        latent_dim: 64,
        entropy_features: 32,
        epochs: 50,
        random_state: Some(42),
        ..PipelineConfig::default()
    };
    let mut pipeline = Pipeline::new(config)?;

    println!("Fitting pipeline (256 -> 128 -> 64 -> 32)...");
    pipeline.fit(&train)?;

    let stats = pipeline.compression_stats()?;
    println!("\n=== Compression Statistics ===");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!(
        "Compression ratio: {}x",
        stats.input_dim / stats.final_dim
    );

    println!("\n=== Ledger Anchoring ===");
    let sample = holdout.row(0).to_owned();
    let record = pipeline.process_vec_for_blockchain(&sample)?;

    println!("Compressed dimension: {}", record.dimension);
    println!("Fingerprint: {}", record.fingerprint);
    println!(
        "Compressed vector (first 8 values): {:?}",
        &record.compressed_vector[..8]
    );

    // A verifier re-derives features and checks fingerprint equality.
    let verification = pipeline.process_vec_for_blockchain(&sample)?;
    match verification.fingerprint == record.fingerprint {
        true => println!("\nVerification fingerprint matches."),
        false => println!("\nVerification fingerprint MISMATCH."),
    }

    // Batch anchoring keeps input row order, one record per row.
    let batch_records = pipeline.process_for_blockchain(&holdout)?;
    println!(
        "\nBatch of {} records anchored; first fingerprint: {}",
        batch_records.len(),
        batch_records[0].fingerprint
    );

    Ok(())
}
