//! Writing the clustered-records report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ndarray::{Array1, Array2, Axis};

use crate::error::{ClusterError, ClusterResult};

/// Writes records grouped by ascending 1-based cluster label.
///
/// Each record line is its attribute values followed by its label, groups
/// are separated by blank lines, and a `Number of Clusters` trailer closes
/// the report. Values are written as-is, with no transformation.
pub fn write_report<W: Write>(
    out: &mut W,
    records: &Array2<f64>,
    labels: &Array1<i32>,
    number_clusters: usize,
) -> io::Result<()> {
    for label in 1..=number_clusters as i32 {
        for (record, &cluster) in records.axis_iter(Axis(0)).zip(labels.iter()) {
            if cluster + 1 == label {
                for value in record.iter() {
                    write!(out, "{} ", value)?;
                }
                writeln!(out, "{}", label)?;
            }
        }
        writeln!(out)?;
        writeln!(out)?;
    }
    write!(out, "\nNumber of Clusters: {}", number_clusters)
}

/// Writes the report to a file in one buffered pass.
pub fn report_to_file(
    path: &Path,
    records: &Array2<f64>,
    labels: &Array1<i32>,
    number_clusters: usize,
) -> ClusterResult<()> {
    let unavailable =
        |e: io::Error| ClusterError::IoUnavailable(format!("{}: {}", path.display(), e));
    let mut out = BufWriter::new(File::create(path).map_err(unavailable)?);
    write_report(&mut out, records, labels, number_clusters).map_err(unavailable)?;
    out.flush().map_err(unavailable)
}
