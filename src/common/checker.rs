//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data, option domains.

use crate::InstanceTable;
use crate::error::{Result, TreeError};


/// Check whether the training table is usable or not.
#[inline(always)]
pub(crate) fn check_table(table: &InstanceTable) -> Result<()> {
    // A tree needs at least one row to pick a label.
    if table.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    Ok(())
}


/// Check the minimal number of instances a node must hold to be split.
#[inline(always)]
pub(crate) fn check_min_instances(n: usize) -> Result<()> {
    if n == 0 {
        return Err(TreeError::invalid_option(
            "minInstancesPerLeaf", "must be at least 1"
        ));
    }
    Ok(())
}


/// Check the number of folds against the number of instances.
#[inline(always)]
pub(crate) fn check_n_folds(n_folds: usize, n_instances: usize)
    -> Result<()>
{
    if n_folds < 2 {
        return Err(TreeError::invalid_option(
            "folds", format!("must be at least 2. got {n_folds}")
        ));
    }
    if n_folds > n_instances {
        return Err(TreeError::invalid_option(
            "folds",
            format!("{n_folds} folds exceed the {n_instances} instances")
        ));
    }
    Ok(())
}
