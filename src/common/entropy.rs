//! Entropy and information gain over label counts.
use crate::{InstanceTable, Value};


/// Returns the entropy (in bits) of a label distribution given as counts.
/// `0 log 0` is treated as `0`; an empty distribution has entropy `0`.
pub fn entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 { return 0f64; }

    let total = total as f64;
    counts.iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
}


/// Returns the information gain of splitting `parent` into `children`.
///
/// `parent` holds the label counts of the whole partition and
/// each element of `children` the label counts of one part.
/// The result is never negative.
///
/// The children are summed in sorted order, so two splits that
/// produce the same parts get bit-identical gains
/// whatever the order their values are declared in.
pub fn information_gain<C>(parent: &[usize], children: &[C]) -> f64
    where C: AsRef<[usize]>
{
    let total = parent.iter().sum::<usize>();
    if total == 0 { return 0f64; }

    let mut children = children.iter()
        .map(|child| child.as_ref())
        .collect::<Vec<_>>();
    children.sort_unstable();

    let total = total as f64;
    let conditional = children.into_iter()
        .map(|child| {
            let size = child.iter().sum::<usize>() as f64;
            (size / total) * entropy(child)
        })
        .sum::<f64>();

    (entropy(parent) - conditional).max(0f64)
}


/// Counts the labels of `rows`.
pub(crate) fn label_counts(table: &InstanceTable, rows: &[usize])
    -> Vec<usize>
{
    let mut counts = vec![0_usize; table.catalog().n_labels()];
    for &row in rows {
        counts[table.label_of(row)] += 1;
    }
    counts
}


/// Returns the label with the largest count, ties to the lowest index.
pub(crate) fn majority(counts: &[usize]) -> usize {
    counts.iter()
        .enumerate()
        .fold((0_usize, 0_usize), |(best, max), (label, &count)| {
            if count > max { (label, count) } else { (best, max) }
        })
        .0
}


/// Partitions `rows` by exact value equality of the `attribute`-th column
/// and returns the label counts of each part.
/// Parts are ordered by value (value index for nominal columns).
pub(crate) fn counts_by_value(
    table: &InstanceTable,
    attribute: usize,
    rows: &[usize],
) -> Vec<Vec<usize>>
{
    let n_labels = table.catalog().n_labels();
    let mut keyed = rows.iter()
        .map(|&row| (table[row][attribute], table.label_of(row)))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b));

    let mut parts: Vec<Vec<usize>> = Vec::new();
    let mut previous: Option<Value> = None;
    for (value, label) in keyed {
        if previous != Some(value) {
            parts.push(vec![0_usize; n_labels]);
            previous = Some(value);
        }
        if let Some(part) = parts.last_mut() { part[label] += 1; }
    }
    parts
}


fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::Nominal(x), Value::Nominal(y)) => x.cmp(y),
        (Value::Numeric(x), Value::Numeric(y)) => x.total_cmp(y),
        _ => std::cmp::Ordering::Equal,
    }
}
