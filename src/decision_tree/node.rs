//! A node struct used in the decision tree algorithm.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{AttributeCatalog, Instance, Value};
use crate::common::entropy::majority;
use crate::error::{Result, TreeError};
use super::splitter::Splitter;


/// Enumeration of branch and leaf nodes.
/// Both keep the label counts of the training instances
/// that reached them.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that tests an attribute and has one child per branch.
    Branch {
        /// The test of this node.
        splitter: Splitter,
        /// Children, in the order of `splitter`'s branches.
        children: Vec<Node>,
        /// The majority label on this node,
        /// used when an instance cannot be routed.
        majority: usize,
        /// Label counts of the training instances on this node.
        distribution: Vec<usize>,
    },
    /// A node that have no child.
    Leaf {
        /// Predicted label.
        label: usize,
        /// Label counts of the training instances on this node.
        distribution: Vec<usize>,
    },
}


impl Node {
    pub(crate) fn branch(
        splitter:     Splitter,
        children:     Vec<Node>,
        distribution: Vec<usize>,
    ) -> Self
    {
        let majority = majority(&distribution);
        Self::Branch { splitter, children, majority, distribution }
    }


    pub(crate) fn leaf(distribution: Vec<usize>) -> Self {
        let label = majority(&distribution);
        Self::Leaf { label, distribution }
    }


    /// Returns `true` if `self` is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the predicted label of a leaf
    /// or the majority label of a branch.
    pub fn label(&self) -> usize {
        match self {
            Self::Branch { majority, .. } => *majority,
            Self::Leaf { label, .. } => *label,
        }
    }


    /// Label counts of the training instances on this node.
    pub fn distribution(&self) -> &[usize] {
        match self {
            Self::Branch { distribution, .. } => &distribution[..],
            Self::Leaf { distribution, .. } => &distribution[..],
        }
    }


    /// Number of training instances on this node.
    pub fn n_instances(&self) -> usize {
        self.distribution().iter().sum()
    }


    /// Number of training instances on this node
    /// whose label differs from [`Node::label`].
    pub fn training_errors(&self) -> usize {
        self.n_instances() - self.distribution()[self.label()]
    }


    /// Number of leaves of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Branch { children, .. } => {
                children.iter().map(Node::n_leaves).sum()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Number of nodes of this sub-tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Branch { children, .. } => {
                1 + children.iter().map(Node::size).sum::<usize>()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Length of the longest root-to-leaf path (a leaf has depth `0`).
    pub fn depth(&self) -> usize {
        match self {
            Self::Branch { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            },
            Self::Leaf { .. } => 0,
        }
    }


    /// Walks down to a leaf. Instances that cannot be routed
    /// stop at the branch and take its majority label.
    pub(crate) fn classify(&self, instance: &Instance) -> usize {
        match self {
            Self::Branch { splitter, children, majority, .. } => {
                match splitter.route(instance) {
                    Some(child) => children[child].classify(instance),
                    None => *majority,
                }
            },
            Self::Leaf { label, .. } => *label,
        }
    }


    /// Same as [`Node::classify`] but reports
    /// instances that cannot be routed.
    pub(crate) fn try_classify(
        &self,
        instance: &Instance,
        catalog: &AttributeCatalog,
    ) -> Result<usize>
    {
        match self {
            Self::Branch { splitter, children, .. } => {
                match splitter.route(instance) {
                    Some(child) => children[child].try_classify(instance, catalog),
                    None => {
                        let attribute = &catalog.attributes()[splitter.attribute()];
                        let value: Value = instance.value(splitter.attribute());
                        Err(TreeError::UnseenCategory {
                            attribute: attribute.name().to_string(),
                            value: attribute.format_value(&value),
                        })
                    },
                }
            },
            Self::Leaf { label, .. } => Ok(*label),
        }
    }


    /// Appends the J48-style text of this sub-tree to `out`.
    pub(crate) fn describe_into(
        &self,
        catalog: &AttributeCatalog,
        level: usize,
        out: &mut String,
    )
    {
        let Self::Branch { splitter, children, .. } = self else {
            out.push_str(&format!(": {}\n", self.leaf_summary(catalog)));
            return;
        };

        for (i, child) in children.iter().enumerate() {
            out.push_str(&"|   ".repeat(level));
            out.push_str(&splitter.condition(i, catalog));
            if child.is_leaf() {
                out.push_str(&format!(": {}\n", child.leaf_summary(catalog)));
            } else {
                out.push('\n');
                child.describe_into(catalog, level + 1, out);
            }
        }
    }


    /// `label (n)` or `label (n/errors)`.
    fn leaf_summary(&self, catalog: &AttributeCatalog) -> String {
        let label = catalog.label_name(self.label()).unwrap_or("?");
        let n = self.n_instances() as f64;
        let errors = self.training_errors();
        if errors == 0 {
            format!("{label} ({n:.1})")
        } else {
            format!("{label} ({n:.1}/{:.1})", errors as f64)
        }
    }


    pub(crate) fn to_dot_info(&self, id: usize, catalog: &AttributeCatalog)
        -> (Vec<String>, usize)
    {
        match self {
            Node::Branch { splitter, children, .. } => {
                let name = catalog.attributes()[splitter.attribute()].name();
                let mut info = vec![
                    format!("\tnode_{id} [ label = \"{name}\" ];\n")
                ];

                let mut next_id = id + 1;
                for (i, child) in children.iter().enumerate() {
                    let child_id = next_id;
                    let (mut child_info, return_id) = child.to_dot_info(
                        child_id, catalog
                    );
                    info.append(&mut child_info);

                    let condition = splitter.condition(i, catalog);
                    let edge = condition.strip_prefix(name)
                        .unwrap_or(&condition)
                        .trim();
                    info.push(format!(
                        "\tnode_{id} -- node_{child_id} [ label = \"{edge}\" ];\n",
                        edge = edge.replace('"', "\\\""),
                    ));
                    next_id = return_id;
                }

                (info, next_id)
            },
            Node::Leaf { .. } => {
                let summary = self.leaf_summary(catalog).replace('"', "\\\"");
                let info = format!(
                    "\tnode_{id} [ label = \"{summary}\", shape = box ];\n",
                );

                (vec![info], id + 1)
            }
        }
    }
}


impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch {
                splitter,
                children,
                majority,
                distribution,
            } => {
                f.debug_struct("Branch")
                    .field("splitter", &splitter)
                    .field("majority", &majority)
                    .field("distribution", &distribution)
                    .field("children", &children)
                    .finish()
            },
            Self::Leaf {
                label,
                distribution,
            } => {
                f.debug_struct("Leaf")
                    .field("label", &label)
                    .field("distribution", &distribution)
                    .finish()
            },
        }
    }
}
