//! Tabular data: attributes, instances, and validated tables.

// Provides attribute and catalog structs.
pub(crate) mod attribute_struct;
// Provides value and instance structs.
pub(crate) mod instance_struct;
// Provides the table struct.
pub(crate) mod table_struct;

// Provides a struct that reads an ARFF file.
pub(crate) mod arff_reader;
// Conversion from `polars::DataFrame`.
pub(crate) mod dataframe;


pub use attribute_struct::{Attribute, AttributeKind, AttributeCatalog};
pub use instance_struct::{Instance, Value};
pub use table_struct::InstanceTable;
pub use arff_reader::{ArffReader, read_arff_str};
