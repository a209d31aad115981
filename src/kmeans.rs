//! Lloyd's k-means with a fixed iteration count.
//!
//! The engine runs exactly the configured number of assign/update passes;
//! there is no convergence check and no early exit. Runs are deterministic:
//! the seed is replayed on every `run`, so the same dataset and parameters
//! always reproduce the same centroids and labels.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::squared_euclidean;
use crate::error::{ClusterError, ClusterResult};

/// Label value for a record that has not been through an assign pass yet.
pub const UNASSIGNED: i32 = -1;

#[derive(Clone, Copy)]
struct Params {
    number_clusters: usize,
    number_iterations: usize,
    seed: u64,
}

/// K-means clustering engine.
pub struct KMeans {
    params: Option<Params>,
}

/// Final centroids and per-record cluster labels of one clustering run.
#[derive(Debug)]
pub struct KMeansResult {
    /// One row per cluster, same dimension as the records.
    pub centroids: Array2<f64>,
    /// Cluster index per record, in `[0, number_clusters)`. Stays at
    /// `UNASSIGNED` when the run was configured with zero iterations.
    pub labels: Array1<i32>,
}

impl KMeans {
    /// Creates an unconfigured engine.
    pub fn new() -> Self {
        KMeans { params: None }
    }

    /// Sets run parameters and the seed of the record-picking generator.
    ///
    /// The cluster count must be positive; the iteration count may be zero,
    /// in which case `run` returns the initial centroids and all-unassigned
    /// labels.
    pub fn configure(
        &mut self,
        number_clusters: usize,
        number_iterations: usize,
        seed: u64,
    ) -> ClusterResult<()> {
        if number_clusters == 0 {
            return Err(ClusterError::InvalidParameter(
                "number of clusters must be positive".to_string(),
            ));
        }
        self.params = Some(Params {
            number_clusters,
            number_iterations,
            seed,
        });
        Ok(())
    }

    /// Clusters the records and returns the final centroids and labels.
    ///
    /// Each centroid starts as a copy of a uniformly drawn record; draws are
    /// independent, so two centroids may start identical, and a cluster
    /// count above the record count leaves the resulting duplicates in
    /// place. Then exactly the configured number of assign/update passes
    /// run, whether or not the labels stabilize earlier.
    pub fn run(&self, records: &Array2<f64>) -> ClusterResult<KMeansResult> {
        let params = self.params.ok_or(ClusterError::NotConfigured)?;
        if records.nrows() == 0 {
            return Err(ClusterError::EmptyDataset);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let centroids = init_centroids(&mut rng, records, params.number_clusters);
        Ok(lloyd(records, centroids, params.number_iterations))
    }
}

impl Default for KMeans {
    fn default() -> Self {
        KMeans::new()
    }
}

/// Picks each initial centroid as a copy of a uniformly random record.
fn init_centroids(rng: &mut StdRng, records: &Array2<f64>, number_clusters: usize) -> Array2<f64> {
    let mut centroids = Array2::zeros((number_clusters, records.ncols()));
    for i in 0..number_clusters {
        let index = rng.gen_range(0..records.nrows());
        centroids.row_mut(i).assign(&records.row(index));
    }
    centroids
}

/// Runs the fixed-count assign/update loop from the given initial centroids.
fn lloyd(records: &Array2<f64>, mut centroids: Array2<f64>, number_iterations: usize) -> KMeansResult {
    let mut labels = Array1::from_elem(records.nrows(), UNASSIGNED);

    for _ in 0..number_iterations {
        assign_step(records, &centroids, &mut labels);
        update_step(records, &labels, &mut centroids);
    }

    KMeansResult { centroids, labels }
}

/// Labels each record with the closest centroid, scanning centroids in
/// ascending index order and keeping the first minimum found on ties.
fn assign_step(records: &Array2<f64>, centroids: &Array2<f64>, labels: &mut Array1<i32>) {
    for (i, record) in records.axis_iter(Axis(0)).enumerate() {
        let mut min_dist = f64::INFINITY;
        let mut min_index = 0;
        for (j, centroid) in centroids.axis_iter(Axis(0)).enumerate() {
            let dist = squared_euclidean(&record, &centroid);
            if dist < min_dist {
                min_dist = dist;
                min_index = j;
            }
        }
        labels[i] = min_index as i32;
    }
}

/// Moves each centroid to the per-attribute mean of its assigned records.
/// A cluster that captured no records keeps its previous centroid.
fn update_step(records: &Array2<f64>, labels: &Array1<i32>, centroids: &mut Array2<f64>) {
    let mut sums = Array2::<f64>::zeros(centroids.dim());
    let mut counts = vec![0usize; centroids.nrows()];

    records
        .axis_iter(Axis(0))
        .zip(labels.iter())
        .for_each(|(record, &label)| {
            sums.row_mut(label as usize).zip_mut_with(&record, |a, &b| *a += b);
            counts[label as usize] += 1;
        });

    centroids
        .axis_iter_mut(Axis(0))
        .enumerate()
        .for_each(|(i, mut centroid)| {
            if counts[i] > 0 {
                centroid.assign(&sums.row(i));
                centroid.mapv_inplace(|v| v / counts[i] as f64);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::sum_squared_error;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ndarray_rand::RandomExt;
    use rand_distr::{Distribution, Normal, Uniform};

    fn configured(number_clusters: usize, number_iterations: usize, seed: u64) -> KMeans {
        let mut kmeans = KMeans::new();
        kmeans
            .configure(number_clusters, number_iterations, seed)
            .unwrap();
        kmeans
    }

    #[test]
    fn configure_rejects_zero_clusters() {
        let mut kmeans = KMeans::new();
        let err = kmeans.configure(0, 10, 1).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidParameter(_)));
    }

    #[test]
    fn run_before_configure_fails() {
        let kmeans = KMeans::new();
        let err = kmeans.run(&array![[0.0], [1.0]]).unwrap_err();
        assert!(matches!(err, ClusterError::NotConfigured));
    }

    #[test]
    fn run_on_empty_dataset_fails() {
        let kmeans = configured(2, 10, 1);
        let err = kmeans.run(&Array2::zeros((0, 3))).unwrap_err();
        assert!(matches!(err, ClusterError::EmptyDataset));
    }

    #[test]
    fn zero_iterations_leaves_labels_unassigned() {
        let records = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let result = configured(2, 0, 42).run(&records).unwrap();

        assert!(result.labels.iter().all(|&label| label == UNASSIGNED));
        // Initial centroids are copies of records.
        for centroid in result.centroids.axis_iter(Axis(0)) {
            assert!(records
                .axis_iter(Axis(0))
                .any(|record| record == centroid));
        }
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = Array2::random_using((40, 3), Uniform::new(0.0, 1.0), &mut rng);

        let a = configured(4, 25, 58947).run(&records).unwrap();
        let b = configured(4, 25, 58947).run(&records).unwrap();

        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centroids, b.centroids);
    }

    #[test]
    fn run_is_idempotent_on_one_engine() {
        let records = array![[0.0], [0.2], [0.9], [1.1], [2.0]];
        let kmeans = configured(2, 15, 7);

        let a = kmeans.run(&records).unwrap();
        let b = kmeans.run(&records).unwrap();

        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centroids, b.centroids);
    }

    #[test]
    fn labels_stay_in_cluster_range() {
        let records = array![[0.1], [0.4], [0.5], [0.8], [0.9], [1.5]];
        let result = configured(3, 10, 11).run(&records).unwrap();
        assert!(result.labels.iter().all(|&label| label >= 0 && label < 3));
    }

    #[test]
    fn assigned_labels_minimize_squared_distance() {
        let records = array![[0.0, 0.0], [0.3, 0.3], [0.9, 1.0], [1.0, 0.9]];
        let result = configured(2, 1, 23).run(&records).unwrap();

        for (record, &label) in records.axis_iter(Axis(0)).zip(result.labels.iter()) {
            let own = squared_euclidean(&record, &result.centroids.row(label as usize));
            for centroid in result.centroids.axis_iter(Axis(0)) {
                assert!(own <= squared_euclidean(&record, &centroid) + 1e-12);
            }
        }
    }

    #[test]
    fn assign_breaks_ties_toward_lowest_index() {
        let records = array![[0.0]];
        let centroids = array![[1.0], [-1.0]];
        let mut labels = Array1::from_elem(1, UNASSIGNED);

        assign_step(&records, &centroids, &mut labels);
        assert_eq!(labels[0], 0);
    }

    #[test]
    fn update_moves_centroids_to_exact_means() {
        let records = array![[0.0, 0.0], [2.0, 2.0], [4.0, 4.0], [10.0, 10.0]];
        let labels = array![0, 0, 0, 1];
        let mut centroids = Array2::zeros((2, 2));

        update_step(&records, &labels, &mut centroids);
        assert_eq!(centroids, array![[2.0, 2.0], [10.0, 10.0]]);
    }

    #[test]
    fn empty_cluster_keeps_previous_centroid() {
        let records = array![[0.0], [1.0]];
        let labels = array![0, 0];
        let mut centroids = array![[5.0], [99.0]];

        update_step(&records, &labels, &mut centroids);
        assert_abs_diff_eq!(centroids[[0, 0]], 0.5);
        assert_abs_diff_eq!(centroids[[1, 0]], 99.0);
    }

    #[test]
    fn two_well_separated_groups_converge_to_their_means() {
        let records = array![[0.0], [0.1], [10.0], [10.1]];
        let initial = array![[0.0], [10.0]];

        let result = lloyd(&records, initial, 5);

        assert_eq!(result.labels, array![0, 0, 1, 1]);
        assert_abs_diff_eq!(result.centroids[[0, 0]], 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(result.centroids[[1, 0]], 10.05, epsilon = 1e-12);

        // Each record sits 0.05 from its centroid, so each contributes
        // (0.05^2)^2 to the doubly squared error total.
        let sse = sum_squared_error(&records, &result.centroids, &result.labels);
        assert_abs_diff_eq!(sse, 4.0 * (0.05f64.powi(2)).powi(2), epsilon = 1e-15);
    }

    #[test]
    fn separates_gaussian_blobs_seeded_near_each_center() {
        let mut rng = StdRng::seed_from_u64(9);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut values = Vec::with_capacity(90 * 2);
        for center in [0.0, 50.0, 100.0] {
            for _ in 0..30 {
                values.push(center + noise.sample(&mut rng));
                values.push(center + noise.sample(&mut rng));
            }
        }
        let records = Array2::from_shape_vec((90, 2), values).unwrap();

        let mut initial = Array2::zeros((3, 2));
        initial.row_mut(0).assign(&records.row(0));
        initial.row_mut(1).assign(&records.row(30));
        initial.row_mut(2).assign(&records.row(60));

        let result = lloyd(&records, initial, 10);

        for blob in 0..3 {
            let first = result.labels[blob * 30];
            for i in 0..30 {
                assert_eq!(result.labels[blob * 30 + i], first);
            }
        }
    }
}
