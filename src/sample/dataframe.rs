//! Conversion from `polars::DataFrame`.
use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{Result, TreeError};
use super::attribute_struct::{Attribute, AttributeCatalog};
use super::instance_struct::{Instance, Value};
use super::table_struct::InstanceTable;


impl InstanceTable {
    /// Convert a `polars::DataFrame` into an [`InstanceTable`]
    /// whose label is the column named `target`.
    ///
    /// Numeric columns become numeric attributes.
    /// String columns become categorical attributes whose values are
    /// ordered by first appearance; boolean columns become `{false,true}`.
    /// Null cells are rejected as [`TreeError::SchemaViolation`].
    pub fn from_dataframe<S: AsRef<str>>(data: &DataFrame, target: S)
        -> Result<Self>
    {
        let n_rows = data.height();
        let columns = data.get_columns()
            .par_iter()
            .map(convert_series)
            .collect::<Result<Vec<_>>>()?;

        let (attributes, cells): (Vec<_>, Vec<_>) = columns.into_iter()
            .unzip();
        let catalog = AttributeCatalog::with_target_name(attributes, target)?;

        let instances = (0..n_rows)
            .map(|row| {
                let values = cells.iter()
                    .map(|column: &Vec<Value>| column[row])
                    .collect::<Vec<_>>();
                Instance::new(values)
            })
            .collect::<Vec<_>>();

        Self::new(catalog, instances)
    }
}


fn convert_series(series: &Series) -> Result<(Attribute, Vec<Value>)> {
    let name = series.name();
    match series.dtype() {
        DataType::Utf8 => {
            let mut declared: Vec<String> = Vec::new();
            let cells = series.utf8()?
                .into_iter()
                .map(|cell| match cell {
                    Some(s) => {
                        let ix = declared.iter()
                            .position(|v| v == s)
                            .unwrap_or_else(|| {
                                declared.push(s.to_string());
                                declared.len() - 1
                            });
                        Value::Nominal(ix)
                    },
                    None => Value::Missing,
                })
                .collect::<Vec<_>>();
            Ok((Attribute::categorical(name, declared), cells))
        },
        DataType::Boolean => {
            let cells = series.bool()?
                .into_iter()
                .map(|cell| {
                    cell.map(|b| Value::Nominal(b as usize))
                        .unwrap_or(Value::Missing)
                })
                .collect::<Vec<_>>();
            Ok((Attribute::categorical(name, ["false", "true"]), cells))
        },
        dtype if dtype.is_numeric() => {
            let casted = series.cast(&DataType::Float64)?;
            let cells = casted.f64()?
                .into_iter()
                .map(|cell| cell.map(Value::Numeric).unwrap_or(Value::Missing))
                .collect::<Vec<_>>();
            Ok((Attribute::numeric(name), cells))
        },
        dtype => Err(TreeError::schema(format!(
            "column `{name}` has an unsupported dtype {dtype}"
        ))),
    }
}
