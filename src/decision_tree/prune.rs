//! Bottom-up pessimistic-error pruning.
//!
//! The estimated number of errors of a leaf holding `n` instances,
//! `e` of which are misclassified, over `k` labels is the
//! Laplace-corrected count `n * (e + k - 1) / (n + k)`.
//! A branch is collapsed into a leaf predicting its majority label when
//! the estimate of that leaf does not exceed the sum of the estimates
//! of the leaves below the (already pruned) branch.
use crate::constants::PRUNING_TOLERANCE;
use super::node::Node;


/// Laplace-corrected error estimate of a leaf predicting `label`.
pub(crate) fn laplace_errors(distribution: &[usize], label: usize, k: usize)
    -> f64
{
    let n = distribution.iter().sum::<usize>() as f64;
    if n == 0f64 { return 0f64; }

    let e = n - distribution[label] as f64;
    let k = k as f64;
    n * (e + k - 1f64) / (n + k)
}


impl Node {
    /// Sum of the error estimates of the leaves of this sub-tree.
    pub(crate) fn estimated_errors(&self, k: usize) -> f64 {
        match self {
            Self::Branch { children, .. } => {
                children.iter()
                    .map(|child| child.estimated_errors(k))
                    .sum()
            },
            Self::Leaf { label, distribution } => {
                laplace_errors(distribution, *label, k)
            },
        }
    }


    /// Prune this sub-tree bottom-up. `k` is the number of labels.
    pub(crate) fn prune(self, k: usize) -> Self {
        let Self::Branch { splitter, children, majority, distribution } = self
        else {
            return self;
        };

        let children = children.into_iter()
            .map(|child| child.prune(k))
            .collect::<Vec<_>>();

        let as_leaf = laplace_errors(&distribution, majority, k);
        let as_tree = children.iter()
            .map(|child| child.estimated_errors(k))
            .sum::<f64>();

        if as_leaf <= as_tree + PRUNING_TOLERANCE {
            tracing::trace!(
                attribute = splitter.attribute(),
                as_leaf,
                as_tree,
                "collapsed a branch"
            );
            Self::Leaf { label: majority, distribution }
        } else {
            Self::Branch { splitter, children, majority, distribution }
        }
    }
}
