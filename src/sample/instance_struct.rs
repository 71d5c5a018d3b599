use serde::{Serialize, Deserialize};

use std::ops::Index;

use crate::error::{Result, TreeError};
use super::attribute_struct::AttributeCatalog;


/// A single cell of an [`Instance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Index into the declared values of a categorical attribute.
    Nominal(usize),
    /// A numeric value.
    Numeric(f64),
    /// An unknown value.
    /// Tables never hold this variant; it is meant for
    /// feature vectors that are passed to a classifier.
    Missing,
}


impl Value {
    /// Returns the value index if `self` is nominal.
    pub fn as_nominal(&self) -> Option<usize> {
        match self {
            Self::Nominal(ix) => Some(*ix),
            _ => None,
        }
    }


    /// Returns the number if `self` is numeric.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(x) => Some(*x),
            _ => None,
        }
    }


    /// Returns `true` for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}


impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Numeric(x)
    }
}


/// A fixed-length row aligned to an [`AttributeCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    values: Vec<Value>,
}


impl Instance {
    /// Construct an instance from raw values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }


    /// Construct an instance of length `len` whose values are all missing.
    pub fn missing(len: usize) -> Self {
        Self { values: vec![Value::Missing; len] }
    }


    /// Encode one textual token per attribute of `catalog`.
    pub fn from_tokens<S>(catalog: &AttributeCatalog, tokens: &[S])
        -> Result<Self>
        where S: AsRef<str>
    {
        if tokens.len() != catalog.len() {
            return Err(TreeError::schema(format!(
                "got {} tokens, expected {}", tokens.len(), catalog.len()
            )));
        }

        let values = catalog.attributes()
            .iter()
            .zip(tokens)
            .map(|(attr, token)| attr.encode(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { values })
    }


    /// Construct an unlabeled instance from `(attribute name, token)` pairs.
    /// Attributes that are not mentioned stay missing.
    ///
    /// ```
    /// use minitrees::{Attribute, AttributeCatalog, Instance, Value};
    ///
    /// let catalog = AttributeCatalog::new(vec![
    ///     Attribute::categorical("hair", ["false", "true"]),
    ///     Attribute::numeric("legs"),
    ///     Attribute::categorical("type", ["mammal", "bird"]),
    /// ], 2).unwrap();
    /// let unicorn = Instance::from_pairs(
    ///     &catalog, &[("hair", "true"), ("legs", "4")]
    /// ).unwrap();
    /// assert_eq!(unicorn[1], Value::Numeric(4.0));
    /// assert!(unicorn[2].is_missing());
    /// ```
    pub fn from_pairs<S, T>(catalog: &AttributeCatalog, pairs: &[(S, T)])
        -> Result<Self>
        where S: AsRef<str>,
              T: AsRef<str>,
    {
        let mut instance = Self::missing(catalog.len());
        for (name, token) in pairs {
            let name = name.as_ref();
            let ix = catalog.index_of(name)
                .ok_or_else(|| TreeError::schema(format!(
                    "attribute `{name}` does not exist"
                )))?;
            instance.values[ix] = catalog.attributes()[ix]
                .encode(token.as_ref())?;
        }
        Ok(instance)
    }


    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }


    /// Returns `true` if `self` has no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }


    /// Returns the values.
    pub fn values(&self) -> &[Value] {
        &self.values[..]
    }


    /// Returns the value at `ix`, or [`Value::Missing`] if out of range.
    pub fn value(&self, ix: usize) -> Value {
        self.values.get(ix).copied().unwrap_or(Value::Missing)
    }


    /// Overwrite the value at `ix`.
    ///
    /// # Panics
    /// Panics if `ix >= self.len()`.
    pub fn set(&mut self, ix: usize, value: Value) {
        self.values[ix] = value;
    }


    /// Returns a copy of `self` without the flagged columns.
    pub(crate) fn retain(&self, drop: &[bool]) -> Self {
        let values = self.values.iter()
            .zip(drop)
            .filter(|(_, &d)| !d)
            .map(|(v, _)| *v)
            .collect();
        Self { values }
    }
}


impl From<Vec<Value>> for Instance {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}


impl Index<usize> for Instance {
    type Output = Value;

    fn index(&self, ix: usize) -> &Self::Output {
        &self.values[ix]
    }
}
