//! Property tests for the feature pipeline
//!
//! Ensures the cleaning, transform, and alignment stages satisfy their
//! invariants over generated inputs:
//! - cleaning leaves no sentinel representable in the output
//! - a fitted transform is deterministic and fixed-width
//! - alignment always returns exactly the target feature-name ordering

use corazon::data::clean::clean_frame;
use corazon::data::frame::RawFrame;
use corazon::features::{align_features, FeaturePipeline};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// A raw cell: a plain number, a sentinel, or junk text
fn raw_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (-500.0f64..500.0).prop_map(|v| format!("{v:.2}")),
        2 => (0i64..5).prop_map(|v| v.to_string()),
        1 => Just("?".to_string()),
        1 => Just("n/a".to_string()),
    ]
}

/// A two-column raw frame with `rows` rows
fn raw_frame(rows: std::ops::Range<usize>) -> impl Strategy<Value = RawFrame> {
    rows.prop_flat_map(|n| {
        (vec(raw_cell(), n), vec(raw_cell(), n)).prop_map(|(a, b)| {
            let rows: Vec<Vec<String>> = a.into_iter().zip(b).map(|(x, y)| vec![x, y]).collect();
            RawFrame::from_rows(vec!["age".to_string(), "sex".to_string()], &rows)
                .expect("rectangular rows")
        })
    })
}

fn feature_name() -> impl Strategy<Value = String> {
    "[a-d]{1,2}".prop_map(|s| format!("num__{s}"))
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_cleaning_leaves_no_sentinel(frame in raw_frame(1..30)) {
        let sentinels = vec!["?".to_string(), "n/a".to_string()];
        let cleaned = clean_frame(&frame, &sentinels).expect("non-numeric sentinels always clean");

        // string-scan the cleaned table: no rendered cell equals a sentinel
        for (_, cells) in cleaned.iter_columns() {
            for cell in cells.iter().flatten() {
                let rendered = format!("{cell}");
                prop_assert!(!sentinels.contains(&rendered));
            }
        }
    }

    #[test]
    fn prop_cleaning_preserves_shape(frame in raw_frame(1..30)) {
        let cleaned = clean_frame(&frame, &["?".to_string(), "n/a".to_string()]).expect("cleans");
        prop_assert_eq!(cleaned.n_rows(), frame.n_rows());
        prop_assert_eq!(cleaned.columns(), frame.columns());
    }
}

// =============================================================================
// Transform Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_fitted_transform_deterministic_and_fixed_width(
        train in raw_frame(2..20),
        test in raw_frame(1..10),
    ) {
        let pipeline = FeaturePipeline::new(
            &["age".to_string()],
            &["sex".to_string()],
            &["?".to_string(), "n/a".to_string()],
        )
        .expect("valid declaration");

        let (fitted, _) = pipeline.fit_transform(&train).expect("fit succeeds");

        let once = fitted.transform(&test).expect("transform succeeds");
        let twice = fitted.transform(&test).expect("transform succeeds");
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.ncols(), fitted.feature_names().len());
        prop_assert_eq!(once.nrows(), test.n_rows());
    }
}

// =============================================================================
// Alignment Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_alignment_always_matches_target_width(
        produced_names in vec(feature_name(), 1..8),
        target_names in vec(feature_name(), 1..8),
        default in -10.0f64..10.0,
    ) {
        let mut produced_names = produced_names;
        produced_names.sort();
        produced_names.dedup();
        let mut target_names = target_names;
        target_names.sort();
        target_names.dedup();

        let produced: Vec<f64> = (0..produced_names.len()).map(|i| i as f64).collect();

        match align_features(&produced_names, &produced, &target_names, default) {
            Ok(aligned) => {
                prop_assert_eq!(aligned.len(), target_names.len());
                // every aligned value is either a produced value or the default
                for (name, value) in target_names.iter().zip(&aligned) {
                    match produced_names.iter().position(|p| p == name) {
                        Some(i) => prop_assert_eq!(*value, produced[i]),
                        None => prop_assert_eq!(*value, default),
                    }
                }
            }
            Err(_) => {
                // only legal on fully disjoint name sets
                prop_assert!(target_names.iter().all(|n| !produced_names.contains(n)));
            }
        }
    }

    #[test]
    fn prop_alignment_identity(names in vec(feature_name(), 1..8)) {
        let mut names = names;
        names.sort();
        names.dedup();
        let values: Vec<f64> = (0..names.len()).map(|i| i as f64 * 1.5).collect();
        let aligned = align_features(&names, &values, &names, 0.0).expect("identity aligns");
        prop_assert_eq!(aligned, values);
    }
}
