//! Tool implementations behind the MCP surface.

pub mod initials;
pub mod locks;
pub mod schema;

pub use initials::{InitialsInput, chinese_initials};
pub use locks::LockInspector;
pub use schema::{SchemaToolHandler, TableDescInput, TableIndexInput, TableNameInput};
