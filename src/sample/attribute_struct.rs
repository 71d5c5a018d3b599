use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::HashSet;

use crate::error::{Result, TreeError};
use super::instance_struct::Value;


/// The semantic type of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// A column that takes one of the enumerated `values`.
    /// The order of `values` defines the value indices.
    Categorical {
        /// Declared value set.
        values: Vec<String>,
    },
    /// A real-valued column, optionally bounded.
    Numeric {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
    },
}


/// A named column of an [`InstanceTable`](crate::InstanceTable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}


impl Attribute {
    /// Construct a categorical attribute.
    pub fn categorical<S, I, T>(name: S, values: I) -> Self
        where S: ToString,
              I: IntoIterator<Item = T>,
              T: ToString,
    {
        let values = values.into_iter()
            .map(|v| v.to_string())
            .collect();
        Self {
            name: name.to_string(),
            kind: AttributeKind::Categorical { values },
        }
    }


    /// Construct an unbounded numeric attribute.
    pub fn numeric<S: ToString>(name: S) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Numeric { min: None, max: None },
        }
    }


    /// Construct a numeric attribute bounded by `[min, max]`.
    pub fn bounded<S: ToString>(name: S, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Numeric { min: Some(min), max: Some(max) },
        }
    }


    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the attribute kind.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }


    /// Returns `true` if the attribute is categorical.
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, AttributeKind::Categorical { .. })
    }


    /// Returns `true` if the attribute is numeric.
    pub fn is_numeric(&self) -> bool {
        !self.is_categorical()
    }


    /// Returns the declared values of a categorical attribute.
    /// Numeric attributes return an empty slice.
    pub fn values(&self) -> &[String] {
        match &self.kind {
            AttributeKind::Categorical { values } => &values[..],
            AttributeKind::Numeric { .. } => &[],
        }
    }


    /// Number of declared values (`0` for numeric attributes).
    pub fn n_values(&self) -> usize {
        self.values().len()
    }


    /// Returns the name of the `ix`-th declared value.
    pub fn value_name(&self, ix: usize) -> Option<&str> {
        self.values().get(ix).map(|v| v.as_str())
    }


    /// Returns the index of the declared value `value`.
    pub fn index_of_value(&self, value: &str) -> Option<usize> {
        self.values().iter().position(|v| v == value)
    }


    /// Encode a textual token into a [`Value`] of this attribute.
    /// The token `?` encodes [`Value::Missing`].
    pub fn encode(&self, token: &str) -> Result<Value> {
        let token = token.trim();
        if token == "?" { return Ok(Value::Missing); }

        match &self.kind {
            AttributeKind::Categorical { values } => {
                values.iter()
                    .position(|v| v == token)
                    .map(Value::Nominal)
                    .ok_or_else(|| TreeError::schema(format!(
                        "`{token}` is not a declared value of `{}`",
                        self.name
                    )))
            },
            AttributeKind::Numeric { .. } => {
                token.parse::<f64>()
                    .map(Value::Numeric)
                    .map_err(|_| TreeError::schema(format!(
                        "`{token}` is not a number (attribute `{}`)",
                        self.name
                    )))
            },
        }
    }


    /// Returns a printable form of `value` with respect to this attribute.
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Nominal(ix) => self.value_name(*ix)
                .map(|v| v.to_string())
                .unwrap_or_else(|| format!("#{ix}")),
            Value::Numeric(x) => format!("{x}"),
            Value::Missing => "?".to_string(),
        }
    }


    /// Checks whether `value` is admissible for a table row.
    pub(crate) fn check(&self, value: &Value)
        -> std::result::Result<(), String>
    {
        match (&self.kind, value) {
            (_, Value::Missing) => {
                Err("missing values are not allowed in a table".into())
            },
            (AttributeKind::Categorical { values }, Value::Nominal(ix)) => {
                if *ix < values.len() {
                    Ok(())
                } else {
                    Err(format!(
                        "value index {ix} is outside the {} declared values",
                        values.len()
                    ))
                }
            },
            (AttributeKind::Numeric { min, max }, Value::Numeric(x)) => {
                if !x.is_finite() {
                    return Err(format!("{x} is not a finite number"));
                }
                if min.is_some_and(|lb| *x < lb)
                    || max.is_some_and(|ub| *x > ub)
                {
                    return Err(format!("{x} is outside the declared bounds"));
                }
                Ok(())
            },
            (AttributeKind::Categorical { .. }, Value::Numeric(x)) => {
                Err(format!("expected a categorical value, got {x}"))
            },
            (AttributeKind::Numeric { .. }, Value::Nominal(ix)) => {
                Err(format!("expected a numeric value, got index {ix}"))
            },
        }
    }


    fn validate(&self) -> Result<()> {
        match &self.kind {
            AttributeKind::Categorical { values } => {
                let mut seen = HashSet::with_capacity(values.len());
                if let Some(dup) = values.iter().find(|v| !seen.insert(*v)) {
                    return Err(TreeError::schema(format!(
                        "attribute `{}` declares `{dup}` twice", self.name
                    )));
                }
            },
            AttributeKind::Numeric { min: Some(lb), max: Some(ub) } => {
                if lb > ub {
                    return Err(TreeError::schema(format!(
                        "attribute `{}` has bounds [{lb}, {ub}]", self.name
                    )));
                }
            },
            AttributeKind::Numeric { .. } => {},
        }
        Ok(())
    }
}


impl fmt::Display for Attribute {
    /// Writes the attribute as an ARFF declaration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@attribute {} ", quote(&self.name))?;
        match &self.kind {
            AttributeKind::Categorical { values } => {
                let values = values.iter()
                    .map(|v| quote(v))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{{{values}}}")
            },
            AttributeKind::Numeric { min: Some(lb), max: Some(ub) } => {
                write!(f, "numeric [{lb},{ub}]")
            },
            AttributeKind::Numeric { .. } => write!(f, "numeric"),
        }
    }
}


/// Quotes a token if it contains characters that ARFF treats specially.
pub(crate) fn quote(token: &str) -> String {
    let special = token.is_empty()
        || token.chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '}' | '%' | '\'' | '"'));
    if special {
        format!("'{}'", token.replace('\'', "\\'"))
    } else {
        token.to_string()
    }
}


/// An ordered list of attributes together with the target (label) index.
///
/// The target must be categorical and every name must be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct AttributeCatalog {
    attributes: Vec<Attribute>,
    target: usize,
}


/// The serialized form of [`AttributeCatalog`],
/// validated by [`AttributeCatalog::new`] on deserialization.
#[derive(Deserialize)]
struct RawCatalog {
    attributes: Vec<Attribute>,
    target: usize,
}


impl TryFrom<RawCatalog> for AttributeCatalog {
    type Error = TreeError;

    fn try_from(raw: RawCatalog) -> Result<Self> {
        Self::new(raw.attributes, raw.target)
    }
}


impl AttributeCatalog {
    /// Construct a new catalog whose label is the `target`-th attribute.
    pub fn new(attributes: Vec<Attribute>, target: usize) -> Result<Self> {
        let n_attributes = attributes.len();
        if target >= n_attributes {
            return Err(TreeError::schema(format!(
                "target index {target} is out of range for {n_attributes} attributes"
            )));
        }

        let mut names = HashSet::with_capacity(n_attributes);
        for attribute in attributes.iter() {
            if !names.insert(attribute.name()) {
                return Err(TreeError::schema(format!(
                    "attribute name `{}` is not unique", attribute.name()
                )));
            }
            attribute.validate()?;
        }

        if !attributes[target].is_categorical() {
            return Err(TreeError::schema(format!(
                "target attribute `{}` must be categorical",
                attributes[target].name()
            )));
        }

        Ok(Self { attributes, target })
    }


    /// Construct a new catalog whose label is the attribute named `target`.
    pub fn with_target_name<S: AsRef<str>>(
        attributes: Vec<Attribute>,
        target: S,
    ) -> Result<Self>
    {
        let target = target.as_ref();
        let pos = attributes.iter()
            .position(|a| a.name() == target)
            .ok_or_else(|| TreeError::schema(format!(
                "target attribute `{target}` does not exist"
            )))?;
        Self::new(attributes, pos)
    }


    /// Number of attributes, including the target.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }


    /// Returns `true` if the catalog has no attribute.
    /// A validated catalog always holds the target, so this is `false`.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }


    /// Returns all attributes in column order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the `ix`-th attribute.
    pub fn attribute(&self, ix: usize) -> Option<&Attribute> {
        self.attributes.get(ix)
    }


    /// Returns the column index of the attribute named `name`.
    pub fn index_of<S: AsRef<str>>(&self, name: S) -> Option<usize> {
        let name = name.as_ref();
        self.attributes.iter().position(|a| a.name() == name)
    }


    /// Returns the index of the target attribute.
    pub fn target_index(&self) -> usize {
        self.target
    }


    /// Returns the target attribute.
    pub fn target(&self) -> &Attribute {
        &self.attributes[self.target]
    }


    /// Returns the label names.
    pub fn labels(&self) -> &[String] {
        self.target().values()
    }


    /// Number of labels.
    pub fn n_labels(&self) -> usize {
        self.target().n_values()
    }


    /// Returns the name of the `label`-th label.
    pub fn label_name(&self, label: usize) -> Option<&str> {
        self.target().value_name(label)
    }


    /// Indices of every non-target attribute, ascending.
    pub fn feature_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.attributes.len()).filter(move |&i| i != self.target)
    }


    /// Returns the catalog without the attributes flagged in `drop`.
    /// The caller guarantees that the target is kept.
    pub(crate) fn retain(&self, drop: &[bool]) -> Self {
        let attributes = self.attributes.iter()
            .zip(drop)
            .filter(|(_, &d)| !d)
            .map(|(a, _)| a.clone())
            .collect::<Vec<_>>();
        let target = self.target
            - drop[..self.target].iter().filter(|&&d| d).count();

        Self { attributes, target }
    }
}
