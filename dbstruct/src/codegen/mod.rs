//! Code generation module

mod code_generator;
mod naming;
mod output;
mod struct_generator;
mod type_mapper;

pub use code_generator::*;
pub use naming::*;
pub use output::*;
pub use struct_generator::*;
pub use type_mapper::*;
