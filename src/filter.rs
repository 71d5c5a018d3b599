//! Column projection: drops attributes from a table.
use crate::{InstanceTable, Instance};
use crate::error::{Result, TreeError};


/// Returns a copy of `table` without the columns listed in `drop`.
///
/// Row order and the order of the remaining columns are preserved and the
/// target index is remapped. Duplicated indices are dropped once.
/// Fails with [`TreeError::InvalidColumn`] if an index is out of range
/// or designates the target attribute.
///
/// ```
/// use minitrees::{Attribute, AttributeCatalog, Instance, InstanceTable};
///
/// let catalog = AttributeCatalog::new(vec![
///     Attribute::categorical("animal", ["crow", "bear"]),
///     Attribute::categorical("feathers", ["false", "true"]),
///     Attribute::categorical("type", ["bird", "mammal"]),
/// ], 2).unwrap();
/// let rows = vec![
///     Instance::from_tokens(&catalog, &["crow", "true", "bird"]).unwrap(),
///     Instance::from_tokens(&catalog, &["bear", "false", "mammal"]).unwrap(),
/// ];
/// let table = InstanceTable::new(catalog, rows).unwrap();
///
/// let projected = minitrees::project(&table, &[0]).unwrap();
/// assert_eq!(projected.shape(), (2, 2));
/// assert_eq!(projected.catalog().target_index(), 1);
/// ```
pub fn project(table: &InstanceTable, drop: &[usize]) -> Result<InstanceTable> {
    let n_attributes = table.n_attributes();
    let target = table.catalog().target_index();

    let mut flags = vec![false; n_attributes];
    for &ix in drop {
        if ix >= n_attributes {
            return Err(TreeError::invalid_column(
                ix, format!("the table has {n_attributes} attributes")
            ));
        }
        if ix == target {
            return Err(TreeError::invalid_column(
                ix, "the target attribute cannot be removed"
            ));
        }
        flags[ix] = true;
    }

    let catalog = table.catalog().retain(&flags);
    let instances = table.instances()
        .iter()
        .map(|instance| instance.retain(&flags))
        .collect::<Vec<Instance>>();

    tracing::debug!(
        dropped = flags.iter().filter(|&&d| d).count(),
        remaining = catalog.len(),
        "projected table"
    );

    Ok(InstanceTable::from_parts(
        table.relation().to_string(), catalog, instances
    ))
}


impl InstanceTable {
    /// Returns a copy of `self` without the columns listed in `drop`.
    /// See [`project`].
    pub fn project(&self, drop: &[usize]) -> Result<Self> {
        project(self, drop)
    }


    /// Returns a copy of `self` without the named columns.
    /// Unknown names are reported as a [`TreeError::SchemaViolation`].
    pub fn project_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let drop = names.iter()
            .map(|name| {
                let name = name.as_ref();
                self.catalog()
                    .index_of(name)
                    .ok_or_else(|| TreeError::schema(format!(
                        "attribute `{name}` does not exist"
                    )))
            })
            .collect::<Result<Vec<_>>>()?;
        project(self, &drop)
    }
}
