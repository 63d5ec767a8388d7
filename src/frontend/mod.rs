//! Input side of the crate: the node record schema and the validation run
//! before a tree is built.

pub mod records;
pub mod validate;

pub use records::{parse_records_json, read_records_file, NodeRecord};
pub use validate::validate_records;
