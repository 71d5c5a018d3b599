//! This file defines some tools for tree algorithms
use serde::{Serialize, Deserialize};

use std::{fmt, cmp, ops};

use crate::{AttributeCatalog, Instance, Value};


/// Struct `Depth` defines the remaining depth budget of a tree.
/// This is just a wrapper for `usize`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub(crate) struct Depth(usize);


impl Depth {
    /// A budget that is never exhausted.
    pub(crate) fn unlimited() -> Self {
        Self(usize::MAX)
    }
}


impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == usize::MAX {
            write!(f, "unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}


impl From<usize> for Depth {
    fn from(depth: usize) -> Self {
        Self(depth)
    }
}


impl From<Option<usize>> for Depth {
    fn from(depth: Option<usize>) -> Self {
        depth.map(Self).unwrap_or_else(Self::unlimited)
    }
}


impl ops::Sub<usize> for Depth {
    type Output = Self;
    /// Define the subtraction of the `Depth` struct.
    /// The subtraction does not go below `0`.
    #[inline]
    fn sub(self, other: usize) -> Self::Output {
        Self(self.0.saturating_sub(other))
    }
}


impl cmp::PartialEq<usize> for Depth {
    #[inline]
    fn eq(&self, rhs: &usize) -> bool {
        self.0.eq(rhs)
    }
}


impl cmp::PartialOrd<usize> for Depth {
    #[inline]
    fn partial_cmp(&self, other: &usize) -> Option<cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}


/// The test held by a branch node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Splitter {
    /// One child per value of a categorical attribute.
    /// `branches[i]` is the value index routed to the `i`-th child.
    Nominal {
        /// Column index of the tested attribute.
        attribute: usize,
        /// Value index of each child, ascending.
        branches: Vec<usize>,
    },
    /// Two children: `value <= threshold` and `value > threshold`.
    Threshold {
        /// Column index of the tested attribute.
        attribute: usize,
        /// Split point.
        threshold: f64,
    },
}


impl Splitter {
    /// Returns the column index of the tested attribute.
    pub fn attribute(&self) -> usize {
        match self {
            Self::Nominal { attribute, .. } => *attribute,
            Self::Threshold { attribute, .. } => *attribute,
        }
    }


    /// Number of children of a branch holding this splitter.
    pub fn n_branches(&self) -> usize {
        match self {
            Self::Nominal { branches, .. } => branches.len(),
            Self::Threshold { .. } => 2,
        }
    }


    /// Returns the index of the child `instance` is routed to.
    /// `None` means the value is missing, was not seen during training,
    /// or does not match the kind of the attribute.
    #[inline]
    pub fn route(&self, instance: &Instance) -> Option<usize> {
        let value = instance.value(self.attribute());
        match (self, value) {
            (Self::Nominal { branches, .. }, Value::Nominal(ix)) => {
                branches.binary_search(&ix).ok()
            },
            (Self::Threshold { threshold, .. }, Value::Numeric(x)) => {
                if x <= *threshold { Some(0) } else { Some(1) }
            },
            _ => None,
        }
    }


    /// Returns the condition of the `child`-th branch,
    /// e.g., `wings = true` or `legs <= 3`.
    pub(crate) fn condition(&self, child: usize, catalog: &AttributeCatalog)
        -> String
    {
        let attribute = &catalog.attributes()[self.attribute()];
        let name = attribute.name();
        match self {
            Self::Nominal { branches, .. } => {
                let value = attribute.format_value(
                    &Value::Nominal(branches[child])
                );
                format!("{name} = {value}")
            },
            Self::Threshold { threshold, .. } => {
                let op = if child == 0 { "<=" } else { ">" };
                format!("{name} {op} {threshold}")
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_sub_01() {
        let d1 = Depth::from(3);
        let res = d1 - 1;
        let exp = Depth::from(2);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_depth_sub_02() {
        let d1 = Depth::from(0);
        let res = d1 - 1;
        let exp = Depth::from(0);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_depth_cmp_01() {
        let d1 = Depth::from(None);
        let res = !(d1 < 1);
        assert!(res, "failed for !({d1:?} < 1). got {res}.");
    }

    #[test]
    fn test_route_nominal() {
        let splitter = Splitter::Nominal { attribute: 0, branches: vec![0, 2] };
        let seen = Instance::new(vec![Value::Nominal(2)]);
        let unseen = Instance::new(vec![Value::Nominal(1)]);
        assert_eq!(Some(1), splitter.route(&seen));
        assert_eq!(None, splitter.route(&unseen));
        assert_eq!(None, splitter.route(&Instance::missing(1)));
    }

    #[test]
    fn test_route_threshold() {
        let splitter = Splitter::Threshold { attribute: 1, threshold: 2.5 };
        let left = Instance::new(vec![Value::Missing, Value::Numeric(2.5)]);
        let right = Instance::new(vec![Value::Missing, Value::Numeric(3.0)]);
        assert_eq!(Some(0), splitter.route(&left));
        assert_eq!(Some(1), splitter.route(&right));
        assert_eq!(None, splitter.route(&Instance::missing(2)));
    }
}
