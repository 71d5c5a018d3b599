use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Index;

use crate::error::{Result, TreeError};
use super::attribute_struct::{
    quote,
    Attribute,
    AttributeCatalog,
};
use super::instance_struct::{Instance, Value};


const DEFAULT_RELATION: &str = "dataset";


/// Struct `InstanceTable` holds labeled instances aligned to
/// an [`AttributeCatalog`].
///
/// Every row is validated against the catalog on construction;
/// a table is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct InstanceTable {
    relation: String,
    catalog: AttributeCatalog,
    instances: Vec<Instance>,
}


/// The serialized form of [`InstanceTable`],
/// validated by [`InstanceTable::new`] on deserialization.
#[derive(Deserialize)]
struct RawTable {
    relation: String,
    catalog: AttributeCatalog,
    instances: Vec<Instance>,
}


impl TryFrom<RawTable> for InstanceTable {
    type Error = TreeError;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::new(raw.catalog, raw.instances)
            .map(|table| table.with_relation(raw.relation))
    }
}


impl InstanceTable {
    /// Validate `instances` against `catalog` and build a table.
    ///
    /// Fails with [`TreeError::SchemaViolation`] if a row has the wrong
    /// length, a value has the wrong kind, a categorical value is not
    /// declared, a numeric value is out of its bounds, or a value is missing.
    pub fn new(catalog: AttributeCatalog, instances: Vec<Instance>)
        -> Result<Self>
    {
        let n_attributes = catalog.len();
        for (row, instance) in instances.iter().enumerate() {
            if instance.len() != n_attributes {
                return Err(TreeError::schema(format!(
                    "row {row} has {} values, expected {n_attributes}",
                    instance.len()
                )));
            }

            for (attribute, value) in catalog.attributes()
                .iter()
                .zip(instance.values())
            {
                attribute.check(value)
                    .map_err(|reason| TreeError::schema(format!(
                        "row {row}, attribute `{}`: {reason}",
                        attribute.name()
                    )))?;
            }
        }

        let relation = DEFAULT_RELATION.to_string();
        Ok(Self { relation, catalog, instances })
    }


    /// Set the relation name, printed as the `@relation` header.
    pub fn with_relation<S: ToString>(mut self, relation: S) -> Self {
        self.relation = relation.to_string();
        self
    }


    /// Returns the relation name.
    pub fn relation(&self) -> &str {
        &self.relation
    }


    /// Returns the catalog.
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }


    /// Returns the `ix`-th attribute.
    pub fn attribute(&self, ix: usize) -> Option<&Attribute> {
        self.catalog.attribute(ix)
    }


    /// Number of rows.
    pub fn n_instances(&self) -> usize {
        self.instances.len()
    }


    /// Number of columns, including the target.
    pub fn n_attributes(&self) -> usize {
        self.catalog.len()
    }


    /// Returns `(# of rows, # of columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_instances(), self.n_attributes())
    }


    /// Returns `true` if the table has no row.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }


    /// Returns the rows.
    pub fn instances(&self) -> &[Instance] {
        &self.instances[..]
    }


    /// Returns the `row`-th instance.
    pub fn instance(&self, row: usize) -> Option<&Instance> {
        self.instances.get(row)
    }


    /// Returns the values of the `ix`-th attribute across all rows.
    pub fn column(&self, ix: usize) -> Option<Vec<Value>> {
        if ix >= self.n_attributes() { return None; }

        let column = self.instances.iter()
            .map(|instance| instance[ix])
            .collect();
        Some(column)
    }


    /// Returns the label index of the `row`-th instance.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn label_of(&self, row: usize) -> usize {
        let target = self.catalog.target_index();
        match self.instances[row][target] {
            Value::Nominal(label) => label,
            // Rows are validated against a categorical target.
            _ => unreachable!("the target of row {row} is not nominal"),
        }
    }


    /// Returns the label index of every row.
    pub fn labels(&self) -> Vec<usize> {
        (0..self.n_instances())
            .map(|row| self.label_of(row))
            .collect()
    }


    /// Counts the rows per label.
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0_usize; self.catalog.n_labels()];
        for row in 0..self.n_instances() {
            counts[self.label_of(row)] += 1;
        }
        counts
    }


    /// Builds a table from already validated parts.
    pub(crate) fn from_parts(
        relation: String,
        catalog: AttributeCatalog,
        instances: Vec<Instance>,
    ) -> Self
    {
        Self { relation, catalog, instances }
    }


    /// Returns the sub-table made of `rows`, in the given order.
    pub(crate) fn subset(&self, rows: &[usize]) -> Self {
        let instances = rows.iter()
            .map(|&row| self.instances[row].clone())
            .collect();
        Self::from_parts(self.relation.clone(), self.catalog.clone(), instances)
    }
}


impl Index<usize> for InstanceTable {
    type Output = Instance;

    fn index(&self, row: usize) -> &Self::Output {
        &self.instances[row]
    }
}


impl fmt::Display for InstanceTable {
    /// Writes the table in ARFF format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@relation {}\n", quote(&self.relation))?;
        for attribute in self.catalog.attributes() {
            writeln!(f, "{attribute}")?;
        }
        writeln!(f, "\n@data")?;
        for instance in self.instances.iter() {
            let row = self.catalog.attributes()
                .iter()
                .zip(instance.values())
                .map(|(attribute, value)| quote(&attribute.format_value(value)))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::new(vec![
            Attribute::categorical("wings", ["0", "1"]),
            Attribute::numeric("weight"),
            Attribute::categorical("class", ["bird", "mammal"]),
        ], 2).unwrap()
    }

    fn row(wings: usize, weight: f64, class: usize) -> Instance {
        Instance::new(vec![
            Value::Nominal(wings), Value::Numeric(weight), Value::Nominal(class)
        ])
    }

    #[test]
    fn test_table_new_01() {
        let table = InstanceTable::new(
            catalog(), vec![row(1, 0.5, 0), row(0, 60.0, 1)]
        ).unwrap();
        assert_eq!((2, 3), table.shape());
        assert_eq!(vec![0, 1], table.labels());
        assert_eq!(vec![1, 1], table.label_counts());
    }

    #[test]
    fn test_table_length_mismatch() {
        let short = Instance::new(vec![Value::Nominal(0), Value::Nominal(0)]);
        let res = InstanceTable::new(catalog(), vec![row(1, 0.5, 0), short]);
        assert!(
            matches!(res, Err(TreeError::SchemaViolation(_))),
            "expected SchemaViolation, got {res:?}."
        );
    }

    #[test]
    fn test_table_undeclared_category() {
        let res = InstanceTable::new(catalog(), vec![row(2, 0.5, 0)]);
        assert!(matches!(res, Err(TreeError::SchemaViolation(_))));
    }

    #[test]
    fn test_table_missing_value() {
        let mut instance = row(1, 0.5, 0);
        instance.set(1, Value::Missing);
        let res = InstanceTable::new(catalog(), vec![instance]);
        assert!(matches!(res, Err(TreeError::SchemaViolation(_))));
    }

    #[test]
    fn test_table_column() {
        let table = InstanceTable::new(
            catalog(), vec![row(1, 0.5, 0), row(0, 60.0, 1)]
        ).unwrap();
        let res = table.column(1).unwrap();
        let exp = vec![Value::Numeric(0.5), Value::Numeric(60.0)];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
        assert!(table.column(3).is_none());
    }

    #[test]
    fn test_table_deserialize_validates() {
        let table = InstanceTable::new(catalog(), vec![row(1, 0.5, 0)])
            .unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let res: InstanceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, res, "expected {table:?}, got {res:?}.");

        // A numeric label must not get past validation.
        let mut value = serde_json::to_value(&table).unwrap();
        value["instances"][0]["values"][2] =
            serde_json::to_value(Value::Numeric(3.0)).unwrap();
        let res = serde_json::from_value::<InstanceTable>(value);
        let err = res.expect_err("a numeric label was accepted.");
        assert!(err.to_string().contains("schema violation"), "got {err}.");

        // Neither may an undeclared category.
        let mut value = serde_json::to_value(&table).unwrap();
        value["instances"][0]["values"][2] =
            serde_json::to_value(Value::Nominal(7)).unwrap();
        let res = serde_json::from_value::<InstanceTable>(value);
        assert!(res.is_err(), "got {res:?}.");
    }

    #[test]
    fn test_table_display() {
        let table = InstanceTable::new(catalog(), vec![row(1, 0.5, 0)])
            .unwrap()
            .with_relation("toy");
        let text = table.to_string();
        assert!(text.starts_with("@relation toy"), "got {text}");
        assert!(text.contains("@attribute wings {0,1}"), "got {text}");
        assert!(text.ends_with("@data\n1,0.5,bird\n"), "got {text}");
    }
}
