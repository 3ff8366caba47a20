pub mod error;
pub mod event;
pub mod pass;
pub mod rewrite;
pub mod rewriter;
