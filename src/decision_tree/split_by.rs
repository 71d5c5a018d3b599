use rayon::prelude::*;
use fixedbitset::FixedBitSet;

use std::collections::BTreeMap;

use crate::{InstanceTable, Value};
use crate::constants::GAIN_TOLERANCE;
use crate::common::entropy::{information_gain, label_counts};
use super::splitter::Splitter;


/// A scored way to split a partition.
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub(super) splitter: Splitter,
    pub(super) gain: f64,
    /// Row indices routed to each child, in child order.
    pub(super) parts: Vec<Vec<usize>>,
}


/// Returns the split with the highest information gain over `rows`
/// among the attributes flagged in `available`.
/// Ties are broken by the lowest attribute index.
/// Returns `None` if no attribute yields two non-empty children
/// with a positive gain.
pub(super) fn best_split(
    table: &InstanceTable,
    rows: &[usize],
    available: &FixedBitSet,
) -> Option<Candidate>
{
    let parent = label_counts(table, rows);
    let attributes = table.catalog()
        .feature_indices()
        .filter(|&ix| available.contains(ix))
        .collect::<Vec<_>>();

    // `collect` keeps the attribute order,
    // so that the reduction below is deterministic.
    let candidates = attributes.into_par_iter()
        .map(|attribute| {
            if table.catalog().attributes()[attribute].is_categorical() {
                split_nominal(table, rows, attribute, &parent)
            } else {
                split_numeric(table, rows, attribute, &parent)
            }
        })
        .collect::<Vec<_>>();

    candidates.into_iter()
        .flatten()
        .filter(|candidate| candidate.gain > GAIN_TOLERANCE)
        .fold(None, |best: Option<Candidate>, candidate| match best {
            Some(b) if b.gain >= candidate.gain => Some(b),
            _ => Some(candidate),
        })
}


/// One child per value of `attribute` observed in `rows`.
fn split_nominal(
    table: &InstanceTable,
    rows: &[usize],
    attribute: usize,
    parent: &[usize],
) -> Option<Candidate>
{
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &row in rows {
        if let Value::Nominal(ix) = table[row][attribute] {
            groups.entry(ix).or_default().push(row);
        }
    }
    if groups.len() < 2 { return None; }

    let children = groups.values()
        .map(|part| label_counts(table, part))
        .collect::<Vec<_>>();
    let gain = information_gain(parent, &children);

    let branches = groups.keys().copied().collect();
    let parts = groups.into_values().collect();
    let splitter = Splitter::Nominal { attribute, branches };

    Some(Candidate { splitter, gain, parts })
}


/// Two children split at the best midpoint between
/// consecutive distinct values of `attribute`.
fn split_numeric(
    table: &InstanceTable,
    rows: &[usize],
    attribute: usize,
    parent: &[usize],
) -> Option<Candidate>
{
    let mut sorted = rows.iter()
        .filter_map(|&row| {
            table[row][attribute].as_numeric()
                .map(|x| (x, row, table.label_of(row)))
        })
        .collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut left = vec![0_usize; parent.len()];
    let mut right = parent.to_vec();

    // (position of the last row on the left, threshold, gain)
    let mut best: Option<(usize, f64, f64)> = None;
    for i in 0..sorted.len().saturating_sub(1) {
        let (x, _, y) = sorted[i];
        left[y] += 1;
        right[y] -= 1;

        let next = sorted[i + 1].0;
        if x == next { continue; }

        let mut threshold = x + (next - x) / 2f64;
        // The midpoint of adjacent floats may round up to `next`.
        if threshold >= next { threshold = x; }

        let gain = information_gain(parent, &[&left[..], &right[..]]);
        if best.map_or(true, |(_, _, g)| gain > g) {
            best = Some((i, threshold, gain));
        }
    }

    let (pos, threshold, gain) = best?;
    let mut lrows = sorted[..=pos].iter().map(|t| t.1).collect::<Vec<_>>();
    let mut rrows = sorted[pos + 1..].iter().map(|t| t.1).collect::<Vec<_>>();
    lrows.sort_unstable();
    rrows.sort_unstable();

    let splitter = Splitter::Threshold { attribute, threshold };
    Some(Candidate { splitter, gain, parts: vec![lrows, rrows] })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, AttributeCatalog, Instance};

    fn table() -> InstanceTable {
        let catalog = AttributeCatalog::new(vec![
            Attribute::numeric("weight"),
            Attribute::categorical("color", ["red", "blue"]),
            Attribute::categorical("class", ["light", "heavy"]),
        ], 2).unwrap();
        let rows = [
            (1.0, 0, 0), (2.0, 1, 0), (2.0, 0, 0),
            (8.0, 1, 1), (9.0, 0, 1),
        ].iter()
            .map(|&(w, c, y)| Instance::new(vec![
                Value::Numeric(w), Value::Nominal(c), Value::Nominal(y)
            ]))
            .collect();
        InstanceTable::new(catalog, rows).unwrap()
    }

    fn all(n: usize) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(n);
        bits.insert_range(..);
        bits
    }

    #[test]
    fn test_split_numeric_midpoint() {
        let table = table();
        let rows = (0..5).collect::<Vec<_>>();
        let parent = label_counts(&table, &rows);
        let res = split_numeric(&table, &rows, 0, &parent).unwrap();
        let exp = Splitter::Threshold { attribute: 0, threshold: 5.0 };
        assert_eq!(exp, res.splitter, "expected {exp:?}, got {:?}.", res.splitter);
        assert_eq!(vec![vec![0, 1, 2], vec![3, 4]], res.parts);
    }

    #[test]
    fn test_best_split_prefers_gain() {
        let table = table();
        let rows = (0..5).collect::<Vec<_>>();
        let res = best_split(&table, &rows, &all(3)).unwrap();
        assert_eq!(0, res.splitter.attribute());
    }

    #[test]
    fn test_best_split_respects_available() {
        let table = table();
        let rows = (0..5).collect::<Vec<_>>();
        let mut available = all(3);
        available.set(0, false);
        // `color` carries almost no information, but is the only one left.
        let res = best_split(&table, &rows, &available)
            .map(|candidate| candidate.splitter.attribute());
        assert_eq!(Some(1), res, "expected Some(1), got {res:?}.");
    }

    #[test]
    fn test_best_split_tie_lowest_index() {
        // Both attributes split the rows the same way,
        // with their values declared in opposite orders.
        let catalog = AttributeCatalog::new(vec![
            Attribute::categorical("first", ["x", "y", "z"]),
            Attribute::categorical("second", ["z", "y", "x"]),
            Attribute::categorical("class", ["a", "b", "c"]),
        ], 2).unwrap();
        let rows = [
            ("x", "a"), ("x", "a"), ("x", "b"),
            ("y", "b"), ("y", "b"), ("y", "a"),
            ("z", "c"), ("z", "c"), ("z", "a"),
        ].iter()
            .map(|&(v, c)| Instance::from_tokens(&catalog, &[v, v, c]).unwrap())
            .collect();
        let table = InstanceTable::new(catalog, rows).unwrap();

        let rows = (0..9).collect::<Vec<_>>();
        let res = best_split(&table, &rows, &all(3))
            .map(|candidate| candidate.splitter.attribute());
        assert_eq!(Some(0), res, "expected Some(0), got {res:?}.");
    }

    #[test]
    fn test_best_split_constant_column() {
        let table = table();
        // Rows 0 and 2 share color and label.
        let res = best_split(&table, &[0, 2], &all(3));
        assert!(res.is_none(), "expected no split, got {res:?}.");
    }
}
