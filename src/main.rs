use std::fs;
use std::path::Path;

use anyhow::Result;
use dialoguer::Input;
use log::info;

use ckmeans::dataset::{convert_raw_file, load_records};
use ckmeans::kmeans::KMeans;
use ckmeans::report::report_to_file;
use ckmeans::score::sum_squared_error;

const OUTPUT_DIR: &str = "output";
const NORMALIZED_FILE: &str = "normalizedTemp.txt";

const NUMBER_CLUSTERS: usize = 4;
const NUMBER_ITERATIONS: usize = 100;
const SEED: u64 = 58947;

fn main() -> Result<()> {
    env_logger::init();

    let input_file: String = Input::new().with_prompt("Enter input file").interact_text()?;
    let output_file: String = Input::new().with_prompt("Enter output file").interact_text()?;

    fs::create_dir_all(OUTPUT_DIR)?;
    let output_path = Path::new(OUTPUT_DIR).join(output_file);
    let normalized_path = Path::new(OUTPUT_DIR).join(NORMALIZED_FILE);

    convert_raw_file(Path::new(&input_file), &normalized_path)?;
    info!("normalized records written to {}", normalized_path.display());

    let records = load_records(&normalized_path)?;
    info!(
        "loaded {} records with {} attributes",
        records.nrows(),
        records.ncols()
    );

    let mut kmeans = KMeans::new();
    kmeans.configure(NUMBER_CLUSTERS, NUMBER_ITERATIONS, SEED)?;
    let result = kmeans.run(&records)?;
    info!(
        "clustered into {} groups over {} iterations",
        NUMBER_CLUSTERS, NUMBER_ITERATIONS
    );

    report_to_file(&output_path, &records, &result.labels, NUMBER_CLUSTERS)?;
    info!("report written to {}", output_path.display());

    let sse = sum_squared_error(&records, &result.centroids, &result.labels);
    println!("\nSSE: {:.6}", sse);

    Ok(())
}
