//! Re-targeting a predicate onto a different subject type.
//!
//! Given a predicate over `A` and a projection `B -> A`, produce a predicate
//! over `B` equivalent to `|b| pred(selector(b))`. The composition happens
//! at the tree level — the result carries a fresh free variable of type `B`
//! and an invoke-with-argument node holding the selector and the original
//! tree — rather than by nesting two compiled closures, so the result stays
//! a rewritable expression tree.

use std::sync::Arc;

use crate::expr::{Applied, Expr, PredExpr};
use crate::var::Var;

/// The payload of an invoke-with-argument node: an inner predicate over
/// `A`, reached through a selector from the new subject type `B`.
struct Selected<A, B> {
    selector: Arc<dyn Fn(&B) -> A + Send + Sync>,
    inner: PredExpr<A>,
}

impl<A, B> Applied<B> for Selected<A, B> {
    fn test(&self, subject: &B) -> bool {
        let origin = (self.selector)(subject);
        self.inner.matches(&origin)
    }
}

impl<T> PredExpr<T> {
    /// Derives a predicate over `B` from this predicate over `T`, via a
    /// projection from `B` to `T`.
    ///
    /// Equivalent, for every `b`, to `self.matches(&selector(&b))`.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_expr::PredExpr;
    ///
    /// struct Employee {
    ///     name: String,
    /// }
    ///
    /// let short = PredExpr::new(|name: &String| name.len() <= 3);
    /// let short_named = short.transform(|e: &Employee| e.name.clone());
    ///
    /// assert!(short_named.matches(&Employee { name: "Jo".into() }));
    /// assert!(!short_named.matches(&Employee { name: "Roberta".into() }));
    /// ```
    pub fn transform<B, S>(&self, selector: S) -> PredExpr<B>
    where
        T: 'static,
        B: 'static,
        S: Fn(&B) -> T + Send + Sync + 'static,
    {
        let target = Var::labeled("target");
        let applied = Selected {
            selector: Arc::new(selector),
            inner: self.clone(),
        };
        PredExpr::from_parts(
            vec![target],
            Expr::Apply {
                var: target,
                target: Arc::new(applied),
            },
        )
    }
}
