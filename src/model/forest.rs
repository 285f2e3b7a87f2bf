//! Random forest
//!
//! Bagged CART trees with per-split feature subsampling. Each tree trains on
//! a bootstrap resample; splits minimize Gini impurity over a random
//! sqrt-sized feature subset. The whole ensemble is seeded, so two fits with
//! the same seed on the same data produce identical forests.

use crate::error::{Error, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Random forest of CART classification trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// RNG seed for bootstrap and feature subsampling
    pub seed: u64,
    trees: Vec<DecisionTree>,
}

impl Default for RandomForestClassifier {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            max_depth: 10,
            min_samples_split: 5,
            seed: 42,
            trees: Vec::new(),
        }
    }
}

impl RandomForestClassifier {
    /// Forest with the default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit on a feature matrix and 0/1 labels
    pub fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<()> {
        let n_rows = x.nrows();
        if y.len() != n_rows {
            return Err(Error::Data(format!(
                "{} labels for {} rows",
                y.len(),
                n_rows
            )));
        }
        if n_rows == 0 {
            return Err(Error::Data("cannot fit on an empty matrix".to_string()));
        }

        let n_subset = (x.ncols() as f64).sqrt().ceil() as usize;
        let params = TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            n_feature_subset: n_subset.clamp(1, x.ncols().max(1)),
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.trees = (0..self.n_estimators)
            .map(|_| {
                let sample: Vec<usize> =
                    (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();
                DecisionTree::grow(x, y, &sample, &params, &mut rng)
            })
            .collect();
        Ok(())
    }

    /// Probability of the positive class, averaged over trees
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(Error::Data("forest model is not fitted".to_string()));
        }

        let n_trees = self.trees.len() as f64;
        Ok((0..x.nrows())
            .map(|row| {
                let total: f64 = self
                    .trees
                    .iter()
                    .map(|tree| tree.predict_row(x, row))
                    .sum();
                total / n_trees
            })
            .collect())
    }

    /// Hard 0/1 predictions at the 0.5 threshold
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p >= 0.5))
            .collect())
    }
}

struct TreeParams {
    max_depth: usize,
    min_samples_split: usize,
    n_feature_subset: usize,
}

/// One CART tree stored as a flat node arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        /// Positive-class fraction of the training samples in this leaf
        proba: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

impl DecisionTree {
    fn grow(
        x: &Array2<f64>,
        y: &[u8],
        sample: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow_node(x, y, sample, 0, params, rng);
        tree
    }

    fn grow_node(
        &mut self,
        x: &Array2<f64>,
        y: &[u8],
        indices: &[usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let positives = indices.iter().filter(|&&i| y[i] == 1).count();
        let proba = positives as f64 / indices.len() as f64;

        let is_pure = positives == 0 || positives == indices.len();
        if is_pure || depth >= params.max_depth || indices.len() < params.min_samples_split {
            return self.push(Node::Leaf { proba });
        }

        match best_split(x, y, indices, params.n_feature_subset, rng) {
            Some((feature, threshold)) => {
                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| x[[i, feature]] <= threshold);
                if left_idx.is_empty() || right_idx.is_empty() {
                    return self.push(Node::Leaf { proba });
                }

                // reserve the slot before recursing so child indices are stable
                let node = self.push(Node::Leaf { proba });
                let left = self.grow_node(x, y, &left_idx, depth + 1, params, rng);
                let right = self.grow_node(x, y, &right_idx, depth + 1, params, rng);
                self.nodes[node] = Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                };
                node
            }
            None => self.push(Node::Leaf { proba }),
        }
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn predict_row(&self, x: &Array2<f64>, row: usize) -> f64 {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if x[[row, *feature]] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Best `(feature, threshold)` by Gini gain over a random feature subset;
/// `None` when no candidate split separates the samples.
fn best_split(
    x: &Array2<f64>,
    y: &[u8],
    indices: &[usize],
    n_feature_subset: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let mut features: Vec<usize> = (0..x.ncols()).collect();
    features.shuffle(rng);
    features.truncate(n_feature_subset);

    let parent_gini = gini(y, indices);
    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &features {
        let mut values: Vec<f64> = indices.iter().map(|&i| x[[i, feature]]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| x[[i, feature]] <= threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let weighted = (left.len() as f64 * gini(y, &left)
                + right.len() as f64 * gini(y, &right))
                / indices.len() as f64;
            let gain = parent_gini - weighted;

            if gain > best.map_or(1e-12, |(_, _, g)| g) {
                best = Some((feature, threshold, gain));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

fn gini(y: &[u8], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let p = indices.iter().filter(|&&i| y[i] == 1).count() as f64 / indices.len() as f64;
    2.0 * p * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_forest() -> RandomForestClassifier {
        RandomForestClassifier {
            n_estimators: 20,
            max_depth: 4,
            min_samples_split: 2,
            seed: 42,
            trees: Vec::new(),
        }
    }

    #[test]
    fn test_fit_separable_data() {
        let x = array![[-2.0], [-1.5], [-1.0], [1.0], [1.5], [2.0]];
        let y = [0, 0, 0, 1, 1, 1];
        let mut model = small_forest();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y.to_vec());
    }

    #[test]
    fn test_proba_in_unit_interval() {
        let x = array![[-1.0, 0.2], [0.5, -0.4], [1.5, 0.9], [0.1, 0.1]];
        let y = [0, 1, 1, 0];
        let mut model = small_forest();
        model.fit(&x, &y).unwrap();
        for p in model.predict_proba(&x).unwrap() {
            assert!((0.0..=1.0).contains(&p), "probability {p} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let x = array![[-1.0], [0.2], [1.3], [2.0], [-0.7], [0.9]];
        let y = [0, 0, 1, 1, 0, 1];
        let mut a = small_forest();
        let mut b = small_forest();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unfitted_predict_errors() {
        let model = RandomForestClassifier::new();
        assert!(model.predict(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_single_class_data_yields_constant_proba() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = [1, 1, 1];
        let mut model = small_forest();
        model.fit(&x, &y).unwrap();
        for p in model.predict_proba(&x).unwrap() {
            assert_eq!(p, 1.0);
        }
    }
}
