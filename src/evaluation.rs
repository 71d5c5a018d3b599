//! Accuracy estimation: confusion matrices, summaries,
//! and k-fold cross validation.
mod confusion_matrix;
mod cross_validation;
mod summary;

use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{Classifier, InstanceTable};

pub use confusion_matrix::ConfusionMatrix;
pub use cross_validation::{
    cross_validate,
    CrossValidation,
    CrossValidationOptions,
    Folds,
};
pub use summary::Summary;


/// The result of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Aggregated counts.
    pub summary: Summary,
    /// Actual (rows) versus predicted (columns) labels.
    pub confusion: ConfusionMatrix,
}


impl Evaluation {
    /// Classifies every instance of `table` with `model`.
    /// On the training table this gives the training error.
    pub fn of<C: Classifier>(model: &C, table: &InstanceTable) -> Self {
        let mut confusion = ConfusionMatrix::new(table.catalog().labels());
        model.predict_all(table)
            .into_iter()
            .zip(table.labels())
            .for_each(|(predicted, actual)| confusion.add(actual, predicted));

        Self::from(confusion)
    }
}


impl From<ConfusionMatrix> for Evaluation {
    fn from(confusion: ConfusionMatrix) -> Self {
        let summary = Summary::from(&confusion);
        Self { summary, confusion }
    }
}


impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        write!(f, "{}", self.confusion)
    }
}
