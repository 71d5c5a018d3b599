//! Ranks attributes by their information gain with respect to the target.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;

use crate::InstanceTable;
use crate::common::entropy::{
    information_gain,
    label_counts,
    counts_by_value,
};


/// An attribute index paired with its information gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAttribute {
    /// Column index in the ranked table.
    pub index: usize,
    /// Attribute name.
    pub name: String,
    /// Information gain in bits.
    pub gain: f64,
}


impl fmt::Display for RankedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8.4} {:>4} {}", self.gain, self.index, self.name)
    }
}


/// Scores every non-target attribute of `table` by information gain and
/// returns them in descending order of gain.
/// Ties are broken by ascending attribute index.
///
/// Numeric attributes are partitioned by exact value equality.
/// The ranking is diagnostic only; `table` is left as is.
pub fn rank(table: &InstanceTable) -> Vec<RankedAttribute> {
    let rows = (0..table.n_instances()).collect::<Vec<_>>();
    let parent = label_counts(table, &rows);
    let features = table.catalog()
        .feature_indices()
        .collect::<Vec<_>>();

    let mut ranked = features.into_par_iter()
        .map(|index| {
            let parts = counts_by_value(table, index, &rows);
            let gain = information_gain(&parent, &parts);
            let name = table.catalog().attributes()[index]
                .name()
                .to_string();

            RankedAttribute { index, name, gain }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
        b.gain.partial_cmp(&a.gain)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });

    tracing::debug!(
        n_attributes = ranked.len(),
        best = ranked.first().map(|r| r.name.as_str()).unwrap_or(""),
        "ranked attributes by information gain"
    );
    ranked
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::entropy::entropy;
    use crate::{Attribute, AttributeCatalog, Instance, Value};

    // `noise` alternates independently of the label,
    // `wings` determines the label.
    fn table() -> InstanceTable {
        let catalog = AttributeCatalog::new(vec![
            Attribute::categorical("noise", ["p", "q"]),
            Attribute::categorical("wings", ["0", "1"]),
            Attribute::categorical("class", ["bird", "mammal"]),
        ], 2).unwrap();
        let rows = [
            (0, 1, 0), (1, 1, 0),
            (0, 0, 1), (1, 0, 1),
        ].iter()
            .map(|&(n, w, c)| Instance::new(vec![
                Value::Nominal(n), Value::Nominal(w), Value::Nominal(c)
            ]))
            .collect();
        InstanceTable::new(catalog, rows).unwrap()
    }

    #[test]
    fn test_rank_order() {
        let res = rank(&table());
        let names = res.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["wings", "noise"], names, "got {res:?}.");
        assert!((res[0].gain - entropy(&[2, 2])).abs() < 1e-9);
        assert!(res[1].gain.abs() < 1e-9);
    }

    #[test]
    fn test_rank_skips_target() {
        let res = rank(&table());
        assert!(res.iter().all(|r| r.index != 2));
    }

    #[test]
    fn test_rank_tie_mirrored_values() {
        // `second` splits the rows like `first`,
        // but declares its values in reverse order.
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

        let res = rank(&table);
        assert_eq!(res[0].gain, res[1].gain, "got {res:?}.");
        let indices = res.iter().map(|r| r.index).collect::<Vec<_>>();
        assert_eq!(vec![0, 1], indices, "expected [0, 1], got {indices:?}.");
    }

    #[test]
    fn test_rank_deterministic() {
        let table = table();
        let exp = rank(&table);
        let res = rank(&table);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }
}
