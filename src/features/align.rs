//! Schema alignment
//!
//! Reindexes a produced feature vector onto a target feature-name ordering.
//! This is the correctness guarantee of the serving path: any drift between
//! training-time and serving-time columns is reconciled here by name, never
//! by position, so a categorical cardinality change can't silently shift the
//! vector fed to the classifier.

use crate::error::{Error, Result};

/// Reindex `produced` (named by `produced_names`) onto `target_names`.
///
/// Target columns absent from the produced set are filled with `default`;
/// produced columns absent from the target set are dropped. Fails with
/// `Error::SchemaMismatch` when the two name sets share nothing at all; at
/// that point the vectors describe unrelated schemas and a default-filled
/// result would be meaningless.
pub fn align_features(
    produced_names: &[String],
    produced: &[f64],
    target_names: &[String],
    default: f64,
) -> Result<Vec<f64>> {
    if produced_names.len() != produced.len() {
        return Err(Error::Data(format!(
            "{} feature names for {} values",
            produced_names.len(),
            produced.len()
        )));
    }

    let overlap = target_names
        .iter()
        .any(|name| produced_names.contains(name));
    if !overlap && !target_names.is_empty() && !produced_names.is_empty() {
        return Err(Error::SchemaMismatch(format!(
            "no overlap between {} produced and {} target feature names",
            produced_names.len(),
            target_names.len()
        )));
    }

    Ok(target_names
        .iter()
        .map(|name| {
            produced_names
                .iter()
                .position(|p| p == name)
                .map_or(default, |i| produced[i])
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identity_alignment() {
        let n = names(&["a", "b", "c"]);
        let out = align_features(&n, &[1.0, 2.0, 3.0], &n, 0.0).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_reorders_by_name() {
        let out = align_features(
            &names(&["a", "b"]),
            &[1.0, 2.0],
            &names(&["b", "a"]),
            0.0,
        )
        .unwrap();
        assert_eq!(out, vec![2.0, 1.0]);
    }

    #[test]
    fn test_missing_target_column_gets_default() {
        let out = align_features(&names(&["a"]), &[1.0], &names(&["a", "b"]), 0.0).unwrap();
        assert_eq!(out, vec![1.0, 0.0]);
    }

    #[test]
    fn test_extra_produced_column_dropped() {
        let out = align_features(
            &names(&["a", "extra"]),
            &[1.0, 9.0],
            &names(&["a"]),
            0.0,
        )
        .unwrap();
        assert_eq!(out, vec![1.0]);
    }

    #[test]
    fn test_disjoint_schemas_rejected() {
        let err = align_features(&names(&["x"]), &[1.0], &names(&["a", "b"]), 0.0).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn test_name_value_length_mismatch_rejected() {
        let err = align_features(&names(&["a", "b"]), &[1.0], &names(&["a"]), 0.0).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_output_always_target_width() {
        let out = align_features(
            &names(&["a", "b"]),
            &[1.0, 2.0],
            &names(&["b", "c", "d"]),
            -1.0,
        )
        .unwrap();
        assert_eq!(out, vec![2.0, -1.0, -1.0]);
    }
}
