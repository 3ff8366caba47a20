//! Extended field definitions and the catalog that supplies them.

pub mod catalog;
pub mod definition;
pub mod storage;
