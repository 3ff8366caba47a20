//! Report-side descriptors handed to the rewriter by the host.

pub mod filter;
pub mod options;
