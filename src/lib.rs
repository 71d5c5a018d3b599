#![warn(missing_docs)]

//!
//! A crate that grows, prunes, and evaluates decision trees
//! on categorical and numeric tabular data.
//!
//! - [`InstanceTable`] holds validated instances described by an
//!     [`AttributeCatalog`]. Tables are read from ARFF files
//!     ([`ArffReader`]) or converted from a `polars::DataFrame`.
//! - [`project`] drops columns, [`rank`] scores attributes
//!     by information gain.
//! - [`TreeLearner`] grows a [`DecisionTree`] by information-gain splits
//!     (multiway on categorical attributes,
//!     binary thresholds on numeric ones)
//!     and prunes it with Laplace error estimates.
//! - [`CrossValidation`] estimates the accuracy of a [`Learner`]
//!     by seeded k-fold cross validation.
//!
//! ```no_run
//! use minitrees::prelude::*;
//!
//! let table = ArffReader::default()
//!     .file("tests/dataset/zoo.arff")
//!     .read()
//!     .unwrap()
//!     .project_by_name(&["animal"])
//!     .unwrap();
//!
//! let learner = DecisionTreeBuilder::new()
//!     .pruned(false)
//!     .build()
//!     .unwrap();
//! let tree = learner.fit(&table).unwrap();
//! println!("{tree}");
//!
//! let evaluation = CrossValidation::new(&table)
//!     .n_folds(10)
//!     .seed(1)
//!     .evaluate(&learner)
//!     .unwrap();
//! println!("{evaluation}");
//! ```

pub mod constants;
pub mod error;
pub mod prelude;

mod common;
mod sample;
mod hypothesis;
mod filter;
mod attribute_selection;
mod decision_tree;
mod evaluation;


pub use error::{Result, TreeError};

pub use sample::{
    Attribute,
    AttributeKind,
    AttributeCatalog,
    Instance,
    Value,
    InstanceTable,
    ArffReader,
    read_arff_str,
};

pub use hypothesis::{Classifier, Learner};

pub use common::entropy::{entropy, information_gain};
pub use filter::project;
pub use attribute_selection::{rank, RankedAttribute};

pub use decision_tree::{
    DecisionTreeBuilder,
    TreeOptions,
    TreeLearner,
    DecisionTree,
    Node,
    Splitter,
};

pub use evaluation::{
    cross_validate,
    CrossValidation,
    CrossValidationOptions,
    Folds,
    ConfusionMatrix,
    Summary,
    Evaluation,
};
