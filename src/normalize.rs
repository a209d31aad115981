//! Affine normalization of raw customer attributes.
//!
//! Raw values are mapped into a bounded range with fixed per-attribute
//! `(offset, range)` pairs. No bounds checking is applied: values outside
//! the expected domain normalize to values outside `[0, 1]`.

/// Maps a raw value into a bounded range: `(value - offset) / range`.
pub fn normalize(value: f64, offset: f64, range: f64) -> f64 {
    (value - offset) / range
}

/// Normalizes an age in the expected 20-100 domain.
pub fn normalize_age(age: f64) -> f64 {
    normalize(age, 20.0, 80.0)
}

/// Normalizes an income in the expected 20k-100k domain.
pub fn normalize_income(income: f64) -> f64 {
    normalize(income, 20.0, 80.0)
}

/// Normalizes a credit score in the expected 500-900 domain.
pub fn normalize_score(score: f64) -> f64 {
    normalize(score, 500.0, 400.0)
}
