//! Clause rewriters, run in the order select, order-by, group-by, where.

pub mod group_by;
pub mod order_by;
pub mod select;
pub mod where_clause;
