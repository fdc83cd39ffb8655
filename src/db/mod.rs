//! Database access layer: pool construction and value decoding.

pub mod pool;
pub mod value;

pub use pool::build_pool;
pub use value::{column_text, row_values};
