//! The boolean predicate-expression tree.
//!
//! [`Expr`] is an immutable tree representing a boolean-valued computation
//! over one or more free variables; [`PredExpr`] pairs a tree with its
//! declared free-variable list. Trees are never mutated after construction:
//! composition and negation build new trees, sharing leaf closures via
//! `Arc`, so cloning is cheap and instances may be evaluated concurrently
//! from multiple threads.

use std::fmt;
use std::sync::Arc;

use crate::var::Var;

/// A leaf test applied to the subject bound to a free variable.
pub type TestFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// An inner predicate invoked through a selector; the tree-level realization
/// of function composition (see [`PredExpr::transform`]).
///
/// The inner predicate is defined over a different subject type, so it hides
/// behind this object-safe trait rather than appearing as a typed subtree.
pub trait Applied<T>: Send + Sync {
    /// Evaluates the inner predicate against the projection of `subject`.
    fn test(&self, subject: &T) -> bool;
}

/// A node in a boolean predicate-expression tree over subject type `T`.
pub enum Expr<T> {
    /// A constant truth value.
    Const(bool),
    /// A leaf predicate applied to the subject bound to `var`.
    Test {
        /// The free variable this test reads.
        var: Var,
        /// The test itself.
        test: TestFn<T>,
    },
    /// Logical negation.
    Not(Box<Expr<T>>),
    /// Logical conjunction; both operands read the same free variables.
    And(Box<Expr<T>>, Box<Expr<T>>),
    /// Logical alternation; both operands read the same free variables.
    Or(Box<Expr<T>>, Box<Expr<T>>),
    /// Invoke-with-argument: an inner predicate over another subject type,
    /// applied to a projection of the subject bound to `var`.
    Apply {
        /// The free variable the projection reads.
        var: Var,
        /// The selector-composed inner predicate.
        target: Arc<dyn Applied<T>>,
    },
}

impl<T> Expr<T> {
    /// Evaluates the tree against an environment binding variables to
    /// subjects.
    ///
    /// A variable absent from the environment cannot arise through the
    /// public composition operations (every param list covers its body),
    /// only through a hand-assembled [`PredExpr::from_parts`] whose body is
    /// not covered by its params. Debug builds panic on that misuse;
    /// release builds treat the test as a non-match.
    pub(crate) fn eval(&self, env: &[(Var, &T)]) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Test { var, test } => match lookup(env, *var) {
                Some(subject) => test(subject),
                None => unbound(*var),
            },
            Expr::Not(inner) => !inner.eval(env),
            Expr::And(left, right) => left.eval(env) && right.eval(env),
            Expr::Or(left, right) => left.eval(env) || right.eval(env),
            Expr::Apply { var, target } => match lookup(env, *var) {
                Some(subject) => target.test(subject),
                None => unbound(*var),
            },
        }
    }
}

fn lookup<'a, T>(env: &[(Var, &'a T)], var: Var) -> Option<&'a T> {
    env.iter().find(|(v, _)| *v == var).map(|(_, s)| *s)
}

fn unbound(var: Var) -> bool {
    debug_assert!(
        false,
        "variable {var:?} is not bound; the body is not covered by its params"
    );
    false
}

// Derived Clone would demand T: Clone; the tree only ever shares its
// closures, so clone manually.
impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        match self {
            Expr::Const(value) => Expr::Const(*value),
            Expr::Test { var, test } => Expr::Test {
                var: *var,
                test: Arc::clone(test),
            },
            Expr::Not(inner) => Expr::Not(inner.clone()),
            Expr::And(left, right) => Expr::And(left.clone(), right.clone()),
            Expr::Or(left, right) => Expr::Or(left.clone(), right.clone()),
            Expr::Apply { var, target } => Expr::Apply {
                var: *var,
                target: Arc::clone(target),
            },
        }
    }
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "Const({value})"),
            Expr::Test { var, .. } => write!(f, "Test({var:?})"),
            Expr::Not(inner) => write!(f, "Not({inner:?})"),
            Expr::And(left, right) => write!(f, "And({left:?}, {right:?})"),
            Expr::Or(left, right) => write!(f, "Or({left:?}, {right:?})"),
            Expr::Apply { var, .. } => write!(f, "Apply({var:?})"),
        }
    }
}

/// An immutable predicate expression: a boolean tree plus the list of free
/// variables it is defined over.
///
/// In ordinary use the list holds exactly one variable (the subject); the
/// list form exists so that the composer can pair parameters positionally
/// and reject arity mismatches.
///
/// # Example
///
/// ```
/// use muster_expr::PredExpr;
///
/// let long = PredExpr::new(|s: &String| s.len() > 3);
/// let loud = PredExpr::new(|s: &String| s.chars().all(|c| c.is_uppercase()));
///
/// let both = long.and(&loud).unwrap();
/// assert!(both.matches(&"HELLO".to_string()));
/// assert!(!both.matches(&"hello".to_string()));
/// ```
pub struct PredExpr<T> {
    params: Vec<Var>,
    body: Expr<T>,
}

impl<T> PredExpr<T> {
    /// Creates a single-variable predicate from a leaf test.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::with_var(Var::fresh(), test)
    }

    /// Creates a single-variable predicate over a caller-supplied variable.
    pub fn with_var<F>(var: Var, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        PredExpr {
            params: vec![var],
            body: Expr::Test {
                var,
                test: Arc::new(test),
            },
        }
    }

    /// A predicate which matches every subject.
    pub fn always() -> Self {
        PredExpr {
            params: vec![Var::fresh()],
            body: Expr::Const(true),
        }
    }

    /// A predicate which matches no subject.
    pub fn never() -> Self {
        PredExpr {
            params: vec![Var::fresh()],
            body: Expr::Const(false),
        }
    }

    /// Assembles a predicate from an explicit parameter list and body.
    ///
    /// This is the raw constructor used by the composer's wrap step; the
    /// body's variable references should be covered by `params`.
    pub fn from_parts(params: Vec<Var>, body: Expr<T>) -> Self {
        PredExpr { params, body }
    }

    /// The declared free variables, in positional order.
    pub fn params(&self) -> &[Var] {
        &self.params
    }

    /// The expression tree.
    pub fn body(&self) -> &Expr<T> {
        &self.body
    }

    /// The number of declared free variables.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Tests a subject against this predicate.
    ///
    /// Every declared variable is bound to `subject`; the subject type is
    /// shared, so positional variables are interchangeable at evaluation
    /// time even though they are distinct for rewriting.
    pub fn matches(&self, subject: &T) -> bool {
        let env: Vec<(Var, &T)> = self.params.iter().map(|v| (*v, subject)).collect();
        self.body.eval(&env)
    }

    /// Compiles this predicate into a standalone callable.
    ///
    /// The closure owns a clone of the tree (cheap; leaves are shared), so
    /// it can outlive `self` and be handed to eager filtering code.
    pub fn to_fn(&self) -> impl Fn(&T) -> bool + Send + Sync
    where
        T: Send + Sync,
    {
        let expr = self.clone();
        move |subject| expr.matches(subject)
    }

    /// The logical complement of this predicate, preserving its variables.
    pub fn negate(&self) -> PredExpr<T> {
        PredExpr {
            params: self.params.clone(),
            body: Expr::Not(Box::new(self.body.clone())),
        }
    }
}

impl<T> Clone for PredExpr<T> {
    fn clone(&self) -> Self {
        PredExpr {
            params: self.params.clone(),
            body: self.body.clone(),
        }
    }
}

impl<T> fmt::Debug for PredExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredExpr")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_test_matches() {
        let positive = PredExpr::new(|n: &i64| *n > 0);
        assert!(positive.matches(&5));
        assert!(!positive.matches(&-5));
        assert!(!positive.matches(&0));
    }

    #[test]
    fn always_and_never() {
        let yes = PredExpr::<i64>::always();
        let no = PredExpr::<i64>::never();
        assert!(yes.matches(&0));
        assert!(!no.matches(&0));
    }

    #[test]
    fn negate_inverts() {
        let positive = PredExpr::new(|n: &i64| *n > 0);
        let non_positive = positive.negate();
        assert!(!non_positive.matches(&5));
        assert!(non_positive.matches(&-5));
        // The original is untouched.
        assert!(positive.matches(&5));
    }

    #[test]
    fn to_fn_is_standalone() {
        let f = {
            let positive = PredExpr::new(|n: &i64| *n > 0);
            positive.to_fn()
        };
        assert!(f(&1));
        assert!(!f(&-1));
    }

    #[test]
    fn clone_shares_leaves() {
        let a = PredExpr::new(|s: &String| s.is_empty());
        let b = a.clone();
        assert_eq!(a.params(), b.params());
        assert!(b.matches(&String::new()));
    }

    #[test]
    fn arity_reports_param_count() {
        let single = PredExpr::<u8>::always();
        assert_eq!(single.arity(), 1);

        let double = PredExpr::<u8>::from_parts(
            vec![Var::fresh(), Var::fresh()],
            Expr::Const(true),
        );
        assert_eq!(double.arity(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not bound")]
    fn uncovered_body_variable_is_loud() {
        let stray = Var::labeled("stray");
        let bad = PredExpr::<i64>::from_parts(
            vec![Var::fresh()],
            Expr::Test {
                var: stray,
                test: Arc::new(|_| true),
            },
        );
        let _ = bad.matches(&1);
    }

    #[test]
    fn debug_shows_tree_shape() {
        let p = PredExpr::new(|n: &i64| *n > 0).negate();
        let rendered = format!("{p:?}");
        assert!(rendered.contains("Not(Test("));
    }
}
