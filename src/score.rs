use ndarray::{Array1, Array2, Axis};

use crate::distance::squared_euclidean;

/// Total error of a finished run: the sum over records of the squared
/// euclidean distance to the assigned centroid, squared again.
///
/// The distance term is already squared; squaring it once more matches the
/// reference scoring for these reports and is kept as-is rather than
/// collapsed to plain SSE.
pub fn sum_squared_error(
    records: &Array2<f64>,
    centroids: &Array2<f64>,
    labels: &Array1<i32>,
) -> f64 {
    records
        .axis_iter(Axis(0))
        .zip(labels.iter())
        .map(|(record, &label)| {
            let dist = squared_euclidean(&record, &centroids.row(label as usize));
            dist * dist
        })
        .sum()
}
