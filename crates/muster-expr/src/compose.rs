//! Combining two independently-authored predicate expressions into one.
//!
//! The two inputs may each have been written against their own free
//! variable (one author's `x`, another's `p`). Composition reconciles them
//! syntactically: the second body is rewritten to refer to the first
//! expression's variables, then the two bodies are joined under a single
//! boolean node. The result is one expression tree over one parameter list
//! — not two predicates glued together at the call site — so it remains a
//! single filter clause for any downstream query translation.

use crate::error::{ExprError, Result};
use crate::expr::{Expr, PredExpr};
use crate::rebind::Rebinder;
use crate::var::VarMap;

/// The logical conjunction of two predicate expressions.
///
/// Fails with [`ExprError::ArityMismatch`] if the expressions declare
/// different numbers of free variables.
pub fn and<T>(first: &PredExpr<T>, second: &PredExpr<T>) -> Result<PredExpr<T>> {
    compose(first, second, Expr::And)
}

/// The logical alternation of two predicate expressions.
///
/// Fails with [`ExprError::ArityMismatch`] if the expressions declare
/// different numbers of free variables.
pub fn or<T>(first: &PredExpr<T>, second: &PredExpr<T>) -> Result<PredExpr<T>> {
    compose(first, second, Expr::Or)
}

/// The logical negation of a predicate expression.
pub fn not<T>(expr: &PredExpr<T>) -> PredExpr<T> {
    expr.negate()
}

/// Composes two predicate expressions with an arbitrary combining node.
///
/// Steps: pair the second expression's free variables positionally with the
/// first's; rebind the second body onto the first's variables; join the two
/// bodies with `combine`; wrap the joined body under the first expression's
/// parameter list. Pure — neither input is modified.
pub fn compose<T, F>(first: &PredExpr<T>, second: &PredExpr<T>, combine: F) -> Result<PredExpr<T>>
where
    F: FnOnce(Box<Expr<T>>, Box<Expr<T>>) -> Expr<T>,
{
    if first.arity() != second.arity() {
        return Err(ExprError::ArityMismatch {
            first: first.arity(),
            second: second.arity(),
        });
    }

    let map: VarMap = second
        .params()
        .iter()
        .copied()
        .zip(first.params().iter().copied())
        .collect();
    let rebound = Rebinder::new(&map).visit(second.body());

    let body = combine(Box::new(first.body().clone()), Box::new(rebound));
    Ok(PredExpr::from_parts(first.params().to_vec(), body))
}

impl<T> PredExpr<T> {
    /// Method form of [`and`].
    pub fn and(&self, other: &PredExpr<T>) -> Result<PredExpr<T>> {
        and(self, other)
    }

    /// Method form of [`or`].
    pub fn or(&self, other: &PredExpr<T>) -> Result<PredExpr<T>> {
        or(self, other)
    }
}
