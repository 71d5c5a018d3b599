//! Exports the data structures, the tree learner, and the traits.
//!
pub use crate::{
    // Data -------------------------------------
    Attribute,
    AttributeCatalog,
    Instance,
    Value,
    InstanceTable,
    ArffReader,


    // Traits -----------------------------------
    Classifier,
    Learner,


    // Decision tree ----------------------------
    DecisionTreeBuilder,
    TreeOptions,
    TreeLearner,
    DecisionTree,


    // Evaluation -------------------------------
    CrossValidation,
    CrossValidationOptions,
    cross_validate,
    Evaluation,


    // Errors -----------------------------------
    TreeError,
};
