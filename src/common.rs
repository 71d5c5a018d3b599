//! Defines some common functions used in this library.

/// Defines entropy and information gain.
pub(crate) mod entropy;

/// Defines some checker functions.
pub(crate) mod checker;
