use fixedbitset::FixedBitSet;

use std::fmt;

use crate::{InstanceTable, Learner};
use crate::common::checker;
use crate::common::entropy::label_counts;
use crate::error::Result;

use super::{
    builder::TreeOptions,
    dtree_classifier::DecisionTree,
    node::Node,
    split_by::best_split,
    splitter::Depth,
};


/// Grows a [`DecisionTree`] by recursive information-gain splits.
///
/// Categorical attributes get one child per value observed in the
/// partition and are not tested again below that branch.
/// Numeric attributes get a binary `<= threshold` / `> threshold` split
/// and may be reused deeper in the tree.
/// After growth, the tree is pruned bottom-up unless
/// [`TreeOptions::pruned`] is `false`.
///
/// A learner is a reusable configuration;
/// every call to [`TreeLearner::fit`] grows an independent tree.
///
/// # Example
/// ```no_run
/// use minitrees::prelude::*;
///
/// let table = ArffReader::default()
///     .file("tests/dataset/zoo.arff")
///     .read()
///     .unwrap();
/// let learner = DecisionTreeBuilder::new()
///     .pruned(false)
///     .build()
///     .unwrap();
/// let tree = learner.fit(&table).unwrap();
/// println!("{}", tree.describe());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TreeLearner {
    options: TreeOptions,
}


impl TreeLearner {
    /// Construct a learner from validated options.
    pub fn new(options: TreeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }


    /// Returns the options of this learner.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }


    /// Grows a tree on every instance of `table`.
    pub fn fit(&self, table: &InstanceTable) -> Result<DecisionTree> {
        checker::check_table(table)?;
        checker::check_min_instances(self.options.min_instances_per_leaf)?;

        let catalog = table.catalog();
        let rows = (0..table.n_instances()).collect::<Vec<_>>();

        let mut available = FixedBitSet::with_capacity(catalog.len());
        catalog.feature_indices()
            .for_each(|ix| available.insert(ix));

        let depth = Depth::from(self.options.max_depth);
        let mut root = self.grow(table, rows, &available, depth);

        if self.options.pruned {
            let (leaves, size) = (root.n_leaves(), root.size());
            root = root.prune(catalog.n_labels());
            tracing::debug!(
                before_leaves = leaves,
                before_size = size,
                after_leaves = root.n_leaves(),
                after_size = root.size(),
                "pruned the tree"
            );
        }

        tracing::info!(
            n_instances = table.n_instances(),
            n_leaves = root.n_leaves(),
            size = root.size(),
            "grew a decision tree"
        );
        Ok(DecisionTree::new(root, catalog.clone()))
    }


    /// Grows the sub-tree over `rows`.
    /// `available` flags the attributes that may still be tested here.
    fn grow(
        &self,
        table: &InstanceTable,
        rows: Vec<usize>,
        available: &FixedBitSet,
        depth: Depth,
    ) -> Node
    {
        let distribution = label_counts(table, &rows);

        let pure = distribution.iter().filter(|&&c| c > 0).count() <= 1;
        if pure
            || rows.len() < self.options.min_instances_per_leaf
            || depth < 1
        {
            return Node::leaf(distribution);
        }

        let Some(candidate) = best_split(table, &rows, available) else {
            return Node::leaf(distribution);
        };

        let attribute = candidate.splitter.attribute();
        tracing::debug!(
            attribute = table.catalog().attributes()[attribute].name(),
            gain = candidate.gain,
            n_rows = rows.len(),
            n_children = candidate.parts.len(),
            "split a node"
        );

        // Categorical attributes are consumed on this path.
        let mut below = available.clone();
        if table.catalog().attributes()[attribute].is_categorical() {
            below.set(attribute, false);
        }

        let children = candidate.parts.into_iter()
            .map(|part| self.grow(table, part, &below, depth - 1))
            .collect::<Vec<_>>();

        Node::branch(candidate.splitter, children, distribution)
    }
}


impl Learner for TreeLearner {
    type Model = DecisionTree;


    fn name(&self) -> &str {
        "Decision Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let depth = Depth::from(self.options.max_depth);
        let info = Vec::from([
            ("Pruned", self.options.pruned.to_string()),
            (
                "Min instances per leaf",
                self.options.min_instances_per_leaf.to_string()
            ),
            ("Max depth", depth.to_string()),
        ]);
        Some(info)
    }


    fn fit(&self, table: &InstanceTable) -> Result<Self::Model> {
        TreeLearner::fit(self, table)
    }
}


impl fmt::Display for TreeLearner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decision Tree ({})", self.options)
    }
}
