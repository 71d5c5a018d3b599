use serde::{Serialize, Deserialize};

use std::fmt;


/// A square table of label counts.
/// Rows are actual labels, columns are predicted labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// Construct an all-zero matrix over `labels`.
    pub fn new<I, T>(labels: I) -> Self
        where I: IntoIterator<Item = T>,
              T: ToString,
    {
        let labels = labels.into_iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>();
        let n = labels.len();
        Self { labels, counts: vec![vec![0; n]; n] }
    }


    /// Returns the label names.
    pub fn labels(&self) -> &[String] {
        &self.labels[..]
    }


    /// Returns the number of labels.
    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }


    /// Counts one instance of label `actual` predicted as `predicted`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn add(&mut self, actual: usize, predicted: usize) {
        self.counts[actual][predicted] += 1;
    }


    /// Adds the counts of `other` to `self`.
    /// Both matrices must be built over the same labels.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.labels, other.labels);
        self.counts.iter_mut()
            .zip(&other.counts)
            .for_each(|(row, other)| {
                row.iter_mut()
                    .zip(other)
                    .for_each(|(c, o)| { *c += o; });
            });
    }


    /// Returns the number of instances of label `actual`
    /// predicted as `predicted`.
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }


    /// Returns the rows of the matrix.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts[..]
    }


    /// Total number of counted instances.
    pub fn total(&self) -> usize {
        self.counts.iter()
            .map(|row| row.iter().sum::<usize>())
            .sum()
    }


    /// Number of instances on the diagonal.
    pub fn correct(&self) -> usize {
        (0..self.n_labels())
            .map(|i| self.counts[i][i])
            .sum()
    }


    /// Number of instances of each actual label.
    pub fn actual_totals(&self) -> Vec<usize> {
        self.counts.iter()
            .map(|row| row.iter().sum())
            .collect()
    }


    /// Number of instances predicted as each label.
    pub fn predicted_totals(&self) -> Vec<usize> {
        (0..self.n_labels())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }
}


/// Short column ids: `a`, ..., `z`, `aa`, `ab`, ...
fn short_id(mut ix: usize) -> String {
    let mut id = Vec::new();
    loop {
        id.push(b'a' + (ix % 26) as u8);
        ix /= 26;
        if ix == 0 { break; }
        ix -= 1;
    }
    id.iter().rev().map(|&b| b as char).collect()
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = (0..self.n_labels()).map(short_id).collect::<Vec<_>>();
        let max_count = self.counts.iter()
            .flatten()
            .max()
            .copied()
            .unwrap_or(0);
        let width = 1 + ids.iter()
            .map(|id| id.len())
            .chain(std::iter::once(max_count.to_string().len()))
            .max()
            .unwrap_or(1);

        writeln!(f, "=== Confusion Matrix ===")?;
        writeln!(f)?;
        for id in ids.iter() {
            write!(f, " {id:>width$}")?;
        }
        writeln!(f, "   <-- classified as")?;

        for (i, row) in self.counts.iter().enumerate() {
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f, " | {:>width$} = {}", ids[i], self.labels[i])?;
        }
        Ok(())
    }
}
