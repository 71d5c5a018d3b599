use serde::{Serialize, Deserialize};

use std::fmt;

use crate::constants::DEFAULT_MIN_INSTANCES;
use crate::common::checker;
use crate::error::Result;
use super::dtree::TreeLearner;


/// Options of [`TreeLearner`].
///
/// The JSON form uses the keys `pruned`, `minInstancesPerLeaf`,
/// and `maxDepth`; absent keys take their defaults.
/// ```
/// use minitrees::TreeOptions;
/// let options = TreeOptions::from_json(r#"{ "pruned": false }"#).unwrap();
/// assert!(!options.pruned);
/// assert_eq!(options.min_instances_per_leaf, 2);
/// assert_eq!(options.max_depth, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TreeOptions {
    /// Apply pessimistic pruning after growth. Default is `true`.
    pub pruned: bool,
    /// Partitions smaller than this become leaves. Default is `2`.
    pub min_instances_per_leaf: usize,
    /// Maximal depth of the tree. The root is at depth `0`.
    /// Default is `None`, i.e., unlimited.
    pub max_depth: Option<usize>,
}


impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            pruned: true,
            min_instances_per_leaf: DEFAULT_MIN_INSTANCES,
            max_depth: None,
        }
    }
}


impl TreeOptions {
    /// Parses options from a JSON object and validates them.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self> {
        let options: Self = serde_json::from_str(json.as_ref())?;
        options.validate()?;
        Ok(options)
    }


    /// Checks that every option is in its domain.
    pub fn validate(&self) -> Result<()> {
        checker::check_min_instances(self.min_instances_per_leaf)
    }
}


impl fmt::Display for TreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        write!(
            f,
            "pruned: {}, min instances per leaf: {}, max depth: {depth}",
            self.pruned,
            self.min_instances_per_leaf,
        )
    }
}


/// A struct that builds [`TreeLearner`].
/// `DecisionTreeBuilder` keeps parameters for constructing a learner.
///
/// # Example
///
/// ```
/// use minitrees::prelude::*;
///
/// let learner = DecisionTreeBuilder::new()
///     .pruned(false)
///     .min_instances_per_leaf(2)
///     .max_depth(5)
///     .build()
///     .unwrap();
/// assert_eq!(learner.options().max_depth, Some(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeBuilder {
    options: TreeOptions,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// pruned: true,
    /// min_instances_per_leaf: DEFAULT_MIN_INSTANCES == 2,
    /// max_depth: unlimited,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Turn pessimistic pruning on or off.
    #[inline]
    pub fn pruned(mut self, pruned: bool) -> Self {
        self.options.pruned = pruned;
        self
    }


    /// Set the minimal number of instances a node needs to be split.
    /// Must be positive; checked by [`build`](Self::build).
    #[inline]
    pub fn min_instances_per_leaf(mut self, n: usize) -> Self {
        self.options.min_instances_per_leaf = n;
        self
    }


    /// Specify the maximal depth of the tree.
    /// `0` yields a single leaf.
    #[inline]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }


    /// Replace every parameter by `options`.
    #[inline]
    pub fn options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }


    /// Build a [`TreeLearner`].
    /// This method consumes `self`.
    pub fn build(self) -> Result<TreeLearner> {
        TreeLearner::new(self.options)
    }
}
