//! Stratified k-fold splitting
//!
//! Produces train/test index splits that keep each fold's class ratio close
//! to the full data's. Shuffling is seeded, so a given `(labels, k, seed)`
//! always yields the same folds.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// One train/test split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `labels` into `k` stratified folds.
///
/// Indices of each class are shuffled with the seed, then dealt round-robin
/// across folds. Every class must have at least `k` members.
pub fn stratified_kfold(labels: &[u8], k: usize, seed: u64) -> Result<Vec<Fold>> {
    if k < 2 {
        return Err(Error::Config(format!("need at least 2 folds, got {k}")));
    }
    if labels.len() < k {
        return Err(Error::Data(format!(
            "{} samples cannot fill {k} folds",
            labels.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut fold_members: Vec<Vec<usize>> = vec![Vec::new(); k];

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| (l != 0) == (class != 0))
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }
        if members.len() < k {
            return Err(Error::Data(format!(
                "class {class} has {} members, fewer than {k} folds",
                members.len()
            )));
        }
        members.shuffle(&mut rng);
        for (i, idx) in members.into_iter().enumerate() {
            fold_members[i % k].push(idx);
        }
    }

    Ok((0..k)
        .map(|fold| {
            let mut test = fold_members[fold].clone();
            test.sort_unstable();
            let mut train: Vec<usize> = fold_members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != fold)
                .flat_map(|(_, members)| members.iter().copied())
                .collect();
            train.sort_unstable();
            Fold { train, test }
        })
        .collect())
}
