use serde::{Serialize, Deserialize};

use std::fmt;

use super::confusion_matrix::ConfusionMatrix;


/// Aggregated counts of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of classified instances.
    pub total: usize,
    /// Number of correctly classified instances.
    pub correct: usize,
    /// Number of misclassified instances.
    pub incorrect: usize,
    kappa: f64,
}


impl Summary {
    /// Fraction of correctly classified instances.
    /// Returns `0` when nothing was classified.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 { return 0f64; }
        self.correct as f64 / self.total as f64
    }


    /// Fraction of misclassified instances.
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 { return 0f64; }
        self.incorrect as f64 / self.total as f64
    }


    /// Cohen's kappa of the predictions against the actual labels.
    pub fn kappa(&self) -> f64 {
        self.kappa
    }
}


impl From<&ConfusionMatrix> for Summary {
    fn from(confusion: &ConfusionMatrix) -> Self {
        let total = confusion.total();
        let correct = confusion.correct();
        let incorrect = total - correct;

        let kappa = if total == 0 {
            0f64
        } else {
            let n = total as f64;
            let observed = correct as f64 / n;
            let chance = confusion.actual_totals()
                .into_iter()
                .zip(confusion.predicted_totals())
                .map(|(a, p)| (a as f64 / n) * (p as f64 / n))
                .sum::<f64>();

            if chance < 1f64 {
                (observed - chance) / (1f64 - chance)
            } else {
                1f64
            }
        };

        Self { total, correct, incorrect, kappa }
    }
}


impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<40}{:>8}{:>16.4} %",
            "Correctly Classified Instances",
            self.correct,
            100f64 * self.accuracy(),
        )?;
        writeln!(
            f,
            "{:<40}{:>8}{:>16.4} %",
            "Incorrectly Classified Instances",
            self.incorrect,
            100f64 * self.error_rate(),
        )?;
        writeln!(f, "{:<40}{:>14.4}", "Kappa statistic", self.kappa)?;
        writeln!(f, "{:<40}{:>8}", "Total Number of Instances", self.total)
    }
}
