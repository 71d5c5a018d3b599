//! Decision tree induction with information-gain splits
//! and pessimistic pruning.
mod builder;
mod dtree;
mod dtree_classifier;
mod node;
mod prune;
mod split_by;
pub(crate) mod splitter;


pub use builder::{DecisionTreeBuilder, TreeOptions};
pub use dtree::TreeLearner;
pub use dtree_classifier::DecisionTree;
pub use node::Node;
pub use splitter::Splitter;
