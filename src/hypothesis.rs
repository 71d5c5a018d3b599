//! The core library for `Classifier` and `Learner` traits.

pub(crate) mod hypothesis_traits;


pub use hypothesis_traits::{
    Classifier,
    Learner,
};
