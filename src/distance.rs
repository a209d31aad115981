use ndarray::{ArrayBase, Data, Ix1};

/// Computes the squared euclidean distance between two attribute vectors:
/// the sum over attributes of the squared per-attribute differences, with
/// no square root taken.
pub fn squared_euclidean<S1, S2>(x: &ArrayBase<S1, Ix1>, y: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    (&*x - &*y).mapv(|v| v * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn zero_for_identical_vectors() {
        let x = array![0.25, 0.5, 0.75];
        assert_abs_diff_eq!(squared_euclidean(&x, &x), 0.0);
    }

    #[test]
    fn sums_squared_differences_without_root() {
        let x = array![0.0, 0.0];
        let y = array![3.0, 4.0];
        assert_abs_diff_eq!(squared_euclidean(&x, &y), 25.0);
    }

    #[test]
    fn symmetric() {
        let x = array![1.0, -2.0];
        let y = array![-0.5, 0.5];
        assert_abs_diff_eq!(squared_euclidean(&x, &y), squared_euclidean(&y, &x));
    }
}
