pub mod dataset;
pub mod distance;
pub mod error;
pub mod kmeans;
pub mod normalize;
pub mod report;
pub mod score;

pub use error::{ClusterError, ClusterResult};
pub use kmeans::{KMeans, KMeansResult};
