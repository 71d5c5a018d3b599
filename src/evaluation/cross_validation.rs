use rand::prelude::*;
use rayon::prelude::*;
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::iter::Iterator;
use std::ops::Range;

use crate::{Classifier, InstanceTable, Learner};
use crate::common::checker;
use crate::constants::{DEFAULT_FOLDS, DEFAULT_SEED};
use crate::error::Result;
use super::{ConfusionMatrix, Evaluation};

const WIDTH: usize = 9;


/// Options of [`cross_validate`] in their JSON form
/// (`{"folds": 10, "seed": 1}`); absent keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossValidationOptions {
    /// Number of folds. Default is `10`.
    pub folds: usize,
    /// Seed of the shuffle. Default is `1`.
    pub seed: u64,
}


impl Default for CrossValidationOptions {
    fn default() -> Self {
        Self { folds: DEFAULT_FOLDS, seed: DEFAULT_SEED }
    }
}


impl CrossValidationOptions {
    /// Parses options from a JSON object.
    /// The number of folds is checked against a table
    /// when the evaluation runs.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self> {
        Ok(serde_json::from_str(json.as_ref())?)
    }
}


/// Estimates the accuracy of `learner` on `table`
/// by `options.folds`-fold cross validation.
///
/// Equivalent to
/// `CrossValidation::new(table).n_folds(folds).seed(seed).evaluate(learner)`.
pub fn cross_validate<L>(
    table: &InstanceTable,
    learner: &L,
    options: CrossValidationOptions,
) -> Result<Evaluation>
    where L: Learner + Sync,
{
    CrossValidation::new(table)
        .n_folds(options.folds)
        .seed(options.seed)
        .evaluate(learner)
}


/// A struct that runs k-fold cross validation on a table.
///
/// The rows are shuffled by a generator seeded with [`seed`](Self::seed),
/// then cut into `k` contiguous groups whose sizes differ by at most one
/// (the first `m mod k` groups get the extra instance).
/// Each group serves once as the test set while the others train.
///
/// # Example
/// ```no_run
/// use minitrees::prelude::*;
///
/// let table = ArffReader::default()
///     .file("tests/dataset/zoo.arff")
///     .read()
///     .unwrap();
/// let learner = TreeLearner::default();
///
/// let evaluation = CrossValidation::new(&table)
///     .n_folds(10)
///     .seed(1)
///     .verbose(true)
///     .evaluate(&learner)
///     .unwrap();
/// println!("{evaluation}");
///
/// // Or iterate over the train/test pairs yourself.
/// for (train, test) in CrossValidation::new(&table).folds().unwrap() {
///     let tree = learner.fit(&train).unwrap();
///     let predictions = tree.predict_all(&test);
///     println!("{:?}", predictions);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidation<'a> {
    table: &'a InstanceTable,
    n_folds: usize,
    seed: u64,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation`.
    #[inline]
    pub fn new(table: &'a InstanceTable) -> Self {
        Self {
            table,
            n_folds: DEFAULT_FOLDS,
            seed: DEFAULT_SEED,
            verbose: false,
        }
    }


    /// Set the number of folds.
    /// Default value is `10`.
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default value is `1`.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints one line per fold
    /// to the standard output.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffled row order and the bounds of each group in it.
    fn partition(&self) -> Result<(Vec<usize>, Vec<Range<usize>>)> {
        checker::check_table(self.table)?;
        let n_instances = self.table.n_instances();
        checker::check_n_folds(self.n_folds, n_instances)?;

        let mut order = (0..n_instances).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(self.seed);
        order.shuffle(&mut rng);

        let base = n_instances / self.n_folds;
        let extra = n_instances % self.n_folds;
        let mut start = 0;
        let groups = (0..self.n_folds)
            .map(|i| {
                let size = base + usize::from(i < extra);
                let group = start..start + size;
                start += size;
                group
            })
            .collect::<Vec<_>>();

        Ok((order, groups))
    }


    /// Returns an iterator over the `(train, test)` pairs, one per fold.
    pub fn folds(&self) -> Result<Folds<'a>> {
        let (order, groups) = self.partition()?;
        Ok(Folds {
            table: self.table,
            order,
            groups,
            current_fold: 0,
            verbose: self.verbose,
        })
    }


    /// Trains `learner` on every fold complement,
    /// classifies the held-out group, and merges the
    /// confusion matrices in fold order.
    ///
    /// The folds run in parallel; any failing fold aborts the whole call.
    pub fn evaluate<L>(&self, learner: &L) -> Result<Evaluation>
        where L: Learner + Sync,
    {
        let (order, groups) = self.partition()?;
        let labels = self.table.catalog().labels();

        let partials = groups.par_iter()
            .enumerate()
            .map(|(i, group)| -> Result<ConfusionMatrix> {
                let train_rows = complement(&order, group);
                let train = self.table.subset(&train_rows);
                let model = learner.fit(&train)?;

                let mut confusion = ConfusionMatrix::new(labels);
                for &row in &order[group.clone()] {
                    let predicted = model.predict(&self.table[row]);
                    confusion.add(self.table.label_of(row), predicted);
                }

                tracing::debug!(
                    fold = i + 1,
                    n_train = train_rows.len(),
                    n_test = group.len(),
                    correct = confusion.correct(),
                    "evaluated a fold"
                );
                Ok(confusion)
            })
            .collect::<Result<Vec<_>>>()?;

        if self.verbose {
            println!(
                "{} {}",
                format!("[{}]", learner.name()).bold().cyan(),
                format!("{}-fold cross validation, seed {}", self.n_folds, self.seed)
                    .bold(),
            );
            if let Some(info) = learner.info() {
                for (key, value) in info {
                    println!("    {key:<24} {value}");
                }
            }
        }

        let mut confusion = ConfusionMatrix::new(labels);
        for (i, (partial, group)) in partials.iter().zip(&groups).enumerate() {
            if self.verbose {
                print_fold(
                    i + 1,
                    self.table.n_instances() - group.len(),
                    group.len(),
                    Some(partial.correct()),
                );
            }
            confusion.merge(partial);
        }

        let evaluation = Evaluation::from(confusion);
        tracing::info!(
            learner = learner.name(),
            folds = self.n_folds,
            seed = self.seed,
            accuracy = evaluation.summary.accuracy(),
            "finished cross validation"
        );
        Ok(evaluation)
    }
}


/// Rows of `order` outside of `group`, in shuffled order.
fn complement(order: &[usize], group: &Range<usize>) -> Vec<usize> {
    order[..group.start].iter()
        .chain(&order[group.end..])
        .copied()
        .collect()
}


fn print_fold(fold: usize, n_train: usize, n_test: usize, correct: Option<usize>) {
    let banner = format!(
        "{}    {}    {}",
        format!("  [{: >3}'th fold]", fold).bold().red(),
        format!("[TRAIN {:>WIDTH$}]", n_train).bold().green(),
        format!("[TEST {:>WIDTH$}]", n_test).bold().yellow(),
    );
    match correct {
        Some(correct) => println!(
            "{banner}    {}",
            format!("[CORRECT {:>WIDTH$}]", correct).bold().blue(),
        ),
        None => println!("{banner}"),
    }
}


/// An iterator over the `(train, test)` tables of a
/// [`CrossValidation`], created by [`CrossValidation::folds`].
#[derive(Debug, Clone)]
pub struct Folds<'a> {
    table: &'a InstanceTable,
    order: Vec<usize>,
    groups: Vec<Range<usize>>,
    current_fold: usize,
    verbose: bool,
}


impl<'a> Folds<'a> {
    /// Row indices (into the original table) of the test group
    /// of the `i`-th fold.
    pub fn test_rows(&self, i: usize) -> Option<&[usize]> {
        self.groups.get(i)
            .map(|group| &self.order[group.clone()])
    }
}


impl<'a> Iterator for Folds<'a> {
    type Item = (InstanceTable, InstanceTable);
    fn next(&mut self) -> Option<Self::Item> {
        let group = self.groups.get(self.current_fold)?.clone();
        self.current_fold += 1;

        let train = self.table.subset(&complement(&self.order, &group));
        let test = self.table.subset(&self.order[group]);

        if self.verbose {
            print_fold(
                self.current_fold,
                train.n_instances(),
                test.n_instances(),
                None,
            );
        }

        Some((train, test))
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.groups.len() - self.current_fold;
        (rest, Some(rest))
    }
}


impl<'a> ExactSizeIterator for Folds<'a> {}
