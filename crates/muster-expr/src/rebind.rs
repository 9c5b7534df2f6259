//! Rewriting free-variable references within an expression tree.

use crate::expr::Expr;
use crate::var::VarMap;

/// A tree visitor which replaces free-variable references according to a
/// binding map.
///
/// The rewrite is deep, structural and side-effect free: nodes are
/// reconstructed bottom-up, the source tree is never mutated, and variables
/// absent from the map (and all non-variable node kinds) pass through
/// unchanged. An empty map is legal and yields a structural copy.
///
/// The composer uses this to make a second expression's body refer to the
/// first expression's variables before the two bodies are joined.
pub struct Rebinder<'a> {
    map: &'a VarMap,
}

impl<'a> Rebinder<'a> {
    /// Creates a rebinder over the given binding map.
    pub fn new(map: &'a VarMap) -> Self {
        Rebinder { map }
    }

    /// Produces a new tree with every mapped variable occurrence replaced
    /// by its destination counterpart.
    pub fn visit<T>(&self, expr: &Expr<T>) -> Expr<T> {
        match expr {
            Expr::Const(value) => Expr::Const(*value),
            Expr::Test { var, test } => Expr::Test {
                var: self.map.get(var).copied().unwrap_or(*var),
                test: test.clone(),
            },
            Expr::Not(inner) => Expr::Not(Box::new(self.visit(inner))),
            Expr::And(left, right) => {
                Expr::And(Box::new(self.visit(left)), Box::new(self.visit(right)))
            }
            Expr::Or(left, right) => {
                Expr::Or(Box::new(self.visit(left)), Box::new(self.visit(right)))
            }
            Expr::Apply { var, target } => Expr::Apply {
                var: self.map.get(var).copied().unwrap_or(*var),
                target: target.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::PredExpr;
    use crate::var::{Var, VarMap};
    use std::sync::Arc;

    fn test_node(var: Var) -> Expr<i64> {
        Expr::Test {
            var,
            test: Arc::new(|n: &i64| *n > 0),
        }
    }

    #[test]
    fn empty_map_is_identity() {
        let var = Var::labeled("x");
        let tree = Expr::Not(Box::new(test_node(var)));

        let map = VarMap::new();
        let copy = Rebinder::new(&map).visit(&tree);

        let original = PredExpr::from_parts(vec![var], tree);
        let rebuilt = PredExpr::from_parts(vec![var], copy);
        assert_eq!(original.matches(&1), rebuilt.matches(&1));
        assert_eq!(original.matches(&-1), rebuilt.matches(&-1));
    }

    #[test]
    fn mapped_variable_is_replaced() {
        let old = Var::labeled("p");
        let new = Var::labeled("x");
        let tree = test_node(old);

        let mut map = VarMap::new();
        map.insert(old, new);
        let rebound = Rebinder::new(&map).visit(&tree);

        // The leaf now references the destination variable.
        assert!(matches!(&rebound, Expr::Test { var, .. } if *var == new));

        let under_new = PredExpr::from_parts(vec![new], rebound);
        assert!(under_new.matches(&1));
    }

    #[test]
    fn unmapped_variable_passes_through() {
        let kept = Var::labeled("x");
        let other = Var::labeled("p");
        let new = Var::labeled("q");
        let tree = test_node(kept);

        let mut map = VarMap::new();
        map.insert(other, new);
        let rebound = Rebinder::new(&map).visit(&tree);

        let expr = PredExpr::from_parts(vec![kept], rebound);
        assert!(expr.matches(&1));
    }

    #[test]
    fn rewrite_reaches_nested_nodes() {
        let old = Var::labeled("p");
        let new = Var::labeled("x");
        let tree = Expr::And(
            Box::new(Expr::Not(Box::new(test_node(old)))),
            Box::new(Expr::Or(
                Box::new(test_node(old)),
                Box::new(Expr::Const(false)),
            )),
        );

        let mut map = VarMap::new();
        map.insert(old, new);
        let rebound = Rebinder::new(&map).visit(&tree);

        // !(n > 0) && ((n > 0) || false) is unsatisfiable; with the
        // variables bound it must evaluate (to false), not fall through
        // as unbound.
        let expr = PredExpr::from_parts(vec![new], rebound);
        assert!(!expr.matches(&1));
        assert!(!expr.matches(&-1));
    }

    #[test]
    fn source_tree_is_untouched() {
        let old = Var::labeled("p");
        let new = Var::labeled("x");
        let tree = test_node(old);

        let mut map = VarMap::new();
        map.insert(old, new);
        let _ = Rebinder::new(&map).visit(&tree);

        let expr = PredExpr::from_parts(vec![old], tree);
        assert!(expr.matches(&1));
    }
}
