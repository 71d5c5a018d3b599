use crate::{Instance, InstanceTable};
use crate::error::Result;


/// A trait that defines the behavor of classifier.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// Predicts the label index of `instance`.
    /// The instance is aligned to the catalog the model was trained on;
    /// the value at the target position is ignored.
    fn predict(&self, instance: &Instance) -> usize;


    /// Predicts the label index of the `row`-th instance of `table`.
    fn predict_row(&self, table: &InstanceTable, row: usize) -> usize {
        self.predict(&table[row])
    }


    /// Predicts the labels of `table`.
    fn predict_all(&self, table: &InstanceTable) -> Vec<usize> {
        table.instances()
            .iter()
            .map(|instance| self.predict(instance))
            .collect::<Vec<_>>()
    }
}


/// A trait that defines the behavior of a learning algorithm.
/// A learner is a reusable configuration;
/// every call to [`Learner::fit`] produces an independent model.
pub trait Learner {
    /// The model produced by this learner.
    type Model: Classifier;


    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the information of the learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Trains a model on `table`.
    fn fit(&self, table: &InstanceTable) -> Result<Self::Model>;
}
