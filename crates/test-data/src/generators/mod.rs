//! Data generators for synthetic race fields.

mod field;

pub use field::{FieldGenerator, GeneratedRunner};
