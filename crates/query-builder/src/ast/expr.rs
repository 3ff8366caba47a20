//! Defines the AST for SQL expressions used in join conditions and
//! where predicates.

use model::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A column identifier, e.g. `score` or `l.score`.
    Identifier(Ident),

    /// A literal value bound as a query parameter.
    Value(Value),

    /// Raw SQL text emitted verbatim, e.g. a host-serialized predicate.
    Literal(String),

    /// A binary operation, e.g. `l.id = t1.lead_id` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// `expr IS NULL` / `expr IS NOT NULL`.
    IsNull { expr: Box<Expr>, negated: bool },

    /// `expr IN (...)` / `expr NOT IN (...)`.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'l' in 'l.score'
    pub name: String,              // e.g., the 'score' in 'l.score'
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    // Comparison
    Eq,      // =
    NotEq,   // <>
    Lt,      // <
    LtEq,    // <=
    Gt,      // >
    GtEq,    // >=
    Like,    // LIKE
    NotLike, // NOT LIKE

    // Logical
    And,
    Or,
}

impl Ident {
    /// Splits `qualifier.name` on the first dot.
    pub fn parse(reference: &str) -> Self {
        match reference.split_once('.') {
            Some((qualifier, name)) => Ident {
                qualifier: Some(qualifier.to_string()),
                name: name.to_string(),
            },
            None => Ident {
                qualifier: None,
                name: reference.to_string(),
            },
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }

    pub fn and(self, other: Expr) -> Self {
        Expr::binary(self, BinaryOperator::And, other)
    }

    pub fn or(self, other: Expr) -> Self {
        Expr::binary(self, BinaryOperator::Or, other)
    }

    /// Visits every node depth-first, children before their parent.
    pub fn walk_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Expr),
    {
        match self {
            Expr::BinaryOp(op) => {
                op.left.walk_mut(f);
                op.right.walk_mut(f);
            }
            Expr::IsNull { expr, .. } => expr.walk_mut(f),
            Expr::InList { expr, list, .. } => {
                expr.walk_mut(f);
                for item in list.iter_mut() {
                    item.walk_mut(f);
                }
            }
            Expr::Identifier(_) | Expr::Value(_) | Expr::Literal(_) => {}
        }
        f(self);
    }
}
