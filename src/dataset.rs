//! Reading record files and converting raw attribute files into
//! normalized ones.
//!
//! A record file is whitespace-delimited: a `number_records
//! number_attributes` header followed by `number_records *
//! number_attributes` real values in row-major order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;

use crate::error::{ClusterError, ClusterResult};
use crate::normalize::{normalize_age, normalize_income, normalize_score};

/// Loads a record file into a `(number_records, number_attributes)` array.
pub fn load_records(path: &Path) -> ClusterResult<Array2<f64>> {
    let text = fs::read_to_string(path)
        .map_err(|e| ClusterError::IoUnavailable(format!("{}: {}", path.display(), e)))?;
    parse_records(&text)
}

/// Parses record-file text into a dense record array.
///
/// Tokens past the declared count are ignored; too few tokens, or a
/// non-numeric token where a number is expected, is `MalformedInput`.
/// Attribute ranges are not validated.
pub fn parse_records(text: &str) -> ClusterResult<Array2<f64>> {
    let mut tokens = text.split_whitespace();
    let number_records = next_count(&mut tokens, "record count")?;
    let number_attributes = next_count(&mut tokens, "attribute count")?;

    let mut values = Vec::with_capacity(number_records * number_attributes);
    for _ in 0..number_records * number_attributes {
        values.push(next_value(&mut tokens)?);
    }

    Array2::from_shape_vec((number_records, number_attributes), values)
        .map_err(|e| ClusterError::MalformedInput(e.to_string()))
}

/// Converts a raw customer file into a normalized record file.
///
/// The input carries the usual header followed by per-record integer
/// triples `(age, income, credit_score)`; the output carries the same
/// header followed by the normalized triples.
pub fn convert_raw_file(input: &Path, output: &Path) -> ClusterResult<()> {
    let text = fs::read_to_string(input)
        .map_err(|e| ClusterError::IoUnavailable(format!("{}: {}", input.display(), e)))?;
    let unavailable =
        |e: std::io::Error| ClusterError::IoUnavailable(format!("{}: {}", output.display(), e));

    let mut tokens = text.split_whitespace();
    let number_records = next_count(&mut tokens, "record count")?;
    let number_attributes = next_count(&mut tokens, "attribute count")?;

    let mut out = BufWriter::new(File::create(output).map_err(unavailable)?);
    writeln!(out, "{} {}", number_records, number_attributes).map_err(unavailable)?;

    for _ in 0..number_records {
        let age = next_integer(&mut tokens, "age")?;
        let income = next_integer(&mut tokens, "income")?;
        let score = next_integer(&mut tokens, "credit score")?;
        writeln!(
            out,
            "{} {} {} ",
            normalize_age(age as f64),
            normalize_income(income as f64),
            normalize_score(score as f64)
        )
        .map_err(unavailable)?;
    }

    out.flush().map_err(unavailable)
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> ClusterResult<&'a str> {
    tokens
        .next()
        .ok_or_else(|| ClusterError::MalformedInput(format!("missing {}", what)))
}

fn next_count<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> ClusterResult<usize> {
    let token = next_token(tokens, what)?;
    token
        .parse()
        .map_err(|_| ClusterError::MalformedInput(format!("{} is not a count: {:?}", what, token)))
}

fn next_integer<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> ClusterResult<i64> {
    let token = next_token(tokens, what)?;
    token
        .parse()
        .map_err(|_| ClusterError::MalformedInput(format!("{} is not an integer: {:?}", what, token)))
}

fn next_value<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> ClusterResult<f64> {
    let token = next_token(tokens, "attribute value")?;
    token.parse().map_err(|_| {
        ClusterError::MalformedInput(format!("attribute value is not a number: {:?}", token))
    })
}
