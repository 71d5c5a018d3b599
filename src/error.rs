//! Error type shared by every fallible operation in this crate.
use std::io;
use std::path::PathBuf;

/// A convenient alias for `Result<T, TreeError>`.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised while building tables, projecting columns,
/// growing trees, or evaluating them.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The catalog or a row of the table is inconsistent.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// A column index given to the projector is out of range
    /// or points at the target attribute.
    #[error("invalid column {index}: {reason}")]
    InvalidColumn {
        /// The offending index.
        index: usize,
        /// Why the index was rejected.
        reason: String,
    },

    /// Training or evaluation was requested on a table without rows.
    #[error("the dataset has no instances")]
    EmptyDataset,

    /// A categorical value reached a split that never saw it in training.
    /// Only [`try_classify`](crate::DecisionTree::try_classify)
    /// surfaces this error; the default path falls back to the majority label.
    #[error("value {value} of attribute `{attribute}` was not seen during training")]
    UnseenCategory {
        /// The attribute tested at the split.
        attribute: String,
        /// A printable form of the value.
        value: String,
    },

    /// A learner or evaluation option is out of its domain.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A dataset file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-indexed line number.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Failed to open or read a dataset file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to (de)serialize options or a model.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to convert a `polars::DataFrame`.
    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}


impl TreeError {
    pub(crate) fn schema<S: Into<String>>(message: S) -> Self {
        Self::SchemaViolation(message.into())
    }


    pub(crate) fn invalid_column<S: Into<String>>(index: usize, reason: S)
        -> Self
    {
        Self::InvalidColumn { index, reason: reason.into() }
    }


    pub(crate) fn invalid_option<S: Into<String>>(
        name: &'static str,
        reason: S,
    ) -> Self
    {
        Self::InvalidOption { name, reason: reason.into() }
    }


    pub(crate) fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse { line, message: message.into() }
    }
}
