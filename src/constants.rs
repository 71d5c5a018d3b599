//! Default parameters and numeric tolerances.

/// Minimal information gain a split must achieve to be kept.
pub const GAIN_TOLERANCE:           f64 = 1e-10;
/// Tolerance used when comparing estimated errors during pruning.
pub const PRUNING_TOLERANCE:        f64 = 1e-12;

/// Default for [`TreeOptions::min_instances_per_leaf`](crate::TreeOptions).
pub const DEFAULT_MIN_INSTANCES:  usize = 2;
/// Default number of folds for cross validation.
pub const DEFAULT_FOLDS:          usize = 10;
/// Default seed for shuffling before cross validation.
pub const DEFAULT_SEED:             u64 = 1;
