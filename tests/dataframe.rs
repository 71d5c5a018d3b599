use minitrees::prelude::*;
use minitrees::AttributeKind;

use polars::prelude::*;


#[test]
fn from_dataframe() {
    let s1 = Series::new("legs", &[2_i64, 4, 0, 2, 4]);
    let s2 = Series::new("feathers", &[true, false, false, true, false]);
    let s3 = Series::new("type", &["bird", "mammal", "fish", "bird", "mammal"]);
    let df = DataFrame::new(vec![s1, s2, s3]).unwrap();

    let table = InstanceTable::from_dataframe(&df, "type").unwrap();

    assert_eq!((5, 3), table.shape());
    assert_eq!(2, table.catalog().target_index());
    assert!(matches!(
        table.catalog().attributes()[0].kind(),
        AttributeKind::Numeric { .. }
    ));
    assert_eq!(&["false", "true"], table.catalog().attributes()[1].values());
    assert_eq!(&["bird", "mammal", "fish"], table.catalog().labels());

    assert_eq!(Value::Numeric(4.0), table[1][0]);
    assert_eq!(Value::Nominal(1), table[0][1]);
    assert_eq!(vec![0, 1, 2, 0, 1], table.labels());

    let tree = DecisionTreeBuilder::new()
        .pruned(false)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();
    assert_eq!(table.labels(), tree.predict_all(&table));
}


#[test]
fn from_dataframe_rejects_nulls() {
    let s1 = Series::new("x", &[Some(1.0), None, Some(3.0)]);
    let s2 = Series::new("y", &["a", "b", "a"]);
    let df = DataFrame::new(vec![s1, s2]).unwrap();

    let res = InstanceTable::from_dataframe(&df, "y");
    assert!(
        matches!(res, Err(TreeError::SchemaViolation(_))),
        "expected SchemaViolation, got {res:?}."
    );
}


#[test]
fn from_dataframe_unknown_target() {
    let s1 = Series::new("x", &[1.0, 2.0]);
    let s2 = Series::new("y", &["a", "b"]);
    let df = DataFrame::new(vec![s1, s2]).unwrap();

    let res = InstanceTable::from_dataframe(&df, "label");
    assert!(res.is_err(), "got {res:?}.");
}
