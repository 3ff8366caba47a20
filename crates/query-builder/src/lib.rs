pub mod ast;
pub mod build;
pub mod dialect;
pub mod macros;
pub mod render;
