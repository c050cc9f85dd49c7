//! Schema introspection module

mod metadata;
mod mysql;
mod reader;

pub use metadata::*;
pub use mysql::*;
pub use reader::*;
