//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{AttributeCatalog, Classifier, Instance};
use crate::error::Result;
use super::node::Node;


/// A trained decision tree.
/// It holds the root node and the catalog of the table it was grown on,
/// so that labels and attribute names can be printed.
///
/// A tree is immutable once built and can be shared across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
    catalog: AttributeCatalog,
}


impl DecisionTree {
    pub(crate) fn new(root: Node, catalog: AttributeCatalog) -> Self {
        Self { root, catalog }
    }


    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the catalog of the training table.
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }


    /// Returns the label index predicted for `instance`.
    ///
    /// A categorical value unseen at a split, a missing value,
    /// or a value of the wrong kind stops the walk at that branch,
    /// which answers its majority label.
    #[inline]
    pub fn classify(&self, instance: &Instance) -> usize {
        self.root.classify(instance)
    }


    /// Same as [`DecisionTree::classify`], but fails with
    /// [`TreeError::UnseenCategory`](crate::TreeError::UnseenCategory)
    /// instead of falling back to the majority label.
    pub fn try_classify(&self, instance: &Instance) -> Result<usize> {
        self.root.try_classify(instance, &self.catalog)
    }


    /// Returns the name of the label predicted for `instance`.
    pub fn classify_label(&self, instance: &Instance) -> &str {
        let label = self.classify(instance);
        &self.catalog.labels()[label]
    }


    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.root.size()
    }


    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the tree as J48-style indented text,
    /// one line per test:
    /// ```text
    /// legs <= 3
    /// |   feathers = false: fish (13.0)
    /// |   feathers = true: bird (20.0)
    /// legs > 3: mammal (41.0/4.0)
    /// ```
    /// A single-leaf tree is printed as `: label (n)`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.root.describe_into(&self.catalog, 0, &mut out);
        out
    }


    /// Returns the tree in the Graphviz `dot` language.
    pub fn to_dot(&self) -> String {
        let info = self.root.to_dot_info(0, &self.catalog).0;

        let mut dot = String::from("graph DecisionTree {\n");
        info.into_iter()
            .for_each(|row| dot.push_str(&row));
        dot.push_str("}\n");
        dot
    }


    /// Serializes the tree to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Deserializes a tree written by [`DecisionTree::to_json`].
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self> {
        Ok(serde_json::from_str(json.as_ref())?)
    }
}


impl Classifier for DecisionTree {
    fn predict(&self, instance: &Instance) -> usize {
        self.classify(instance)
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "J48 tree")?;
        writeln!(f, "------------------")?;
        writeln!(f)?;
        write!(f, "{}", self.describe())?;
        writeln!(f)?;
        writeln!(f, "Number of Leaves  : \t{}", self.n_leaves())?;
        writeln!(f)?;
        writeln!(f, "Size of the tree : \t{}", self.size())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, Value, TreeError};
    use crate::decision_tree::splitter::Splitter;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::new(vec![
            Attribute::categorical("color", ["red", "green", "blue"]),
            Attribute::numeric("size"),
            Attribute::categorical("class", ["apple", "cherry"]),
        ], 2).unwrap()
    }

    // color = red
    // |   size <= 3: cherry (2.0)
    // |   size > 3: apple (3.0/1.0)
    // color = green: apple (4.0)
    fn tree() -> DecisionTree {
        let red = Node::branch(
            Splitter::Threshold { attribute: 1, threshold: 3.0 },
            vec![Node::leaf(vec![0, 2]), Node::leaf(vec![2, 1])],
            vec![2, 3],
        );
        let root = Node::branch(
            Splitter::Nominal { attribute: 0, branches: vec![0, 1] },
            vec![red, Node::leaf(vec![4, 0])],
            vec![6, 3],
        );
        DecisionTree::new(root, catalog())
    }

    #[test]
    fn test_classify_01() {
        let tree = tree();
        let small_red = Instance::new(vec![
            Value::Nominal(0), Value::Numeric(1.0), Value::Missing
        ]);
        assert_eq!(1, tree.classify(&small_red));
        assert_eq!("cherry", tree.classify_label(&small_red));
    }

    #[test]
    fn test_classify_unseen_falls_back() {
        let tree = tree();
        let blue = Instance::new(vec![
            Value::Nominal(2), Value::Numeric(1.0), Value::Missing
        ]);
        assert_eq!(0, tree.classify(&blue));

        let res = tree.try_classify(&blue);
        assert!(
            matches!(
                res,
                Err(TreeError::UnseenCategory { ref attribute, ref value })
                    if attribute == "color" && value == "blue"
            ),
            "got {res:?}."
        );
    }

    #[test]
    fn test_classify_missing_numeric() {
        let tree = tree();
        let red = Instance::new(vec![
            Value::Nominal(0), Value::Missing, Value::Missing
        ]);
        // Stops at the `size` branch, whose majority is `cherry`.
        assert_eq!(1, tree.classify(&red));
    }

    #[test]
    fn test_describe_01() {
        let res = tree().describe();
        let exp = "color = red\n\
                   |   size <= 3: cherry (2.0)\n\
                   |   size > 3: apple (3.0/1.0)\n\
                   color = green: apple (4.0)\n";
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_counts_01() {
        let tree = tree();
        assert_eq!(3, tree.n_leaves());
        assert_eq!(5, tree.size());
        assert_eq!(2, tree.depth());
    }

    #[test]
    fn test_to_dot_01() {
        let dot = tree().to_dot();
        assert!(dot.starts_with("graph DecisionTree {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("node_0 [ label = \"color\" ];"));
        assert!(dot.contains("node_0 -- node_1 [ label = \"= red\" ];"));
        assert!(dot.contains("node_1 -- node_3 [ label = \"> 3\" ];"));
        assert!(dot.contains("node_0 -- node_4 [ label = \"= green\" ];"));
    }

    #[test]
    fn test_json_01() {
        let exp = tree();
        let json = exp.to_json().unwrap();
        let res = DecisionTree::from_json(json).unwrap();
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }
}
