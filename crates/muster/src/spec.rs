//! Specification wrappers: named, reusable predicate objects.
//!
//! A specification comes in two flavors, distinguished by what it can hand
//! to callers:
//!
//! - **Expression-backed** ([`SpecExpression`]): exposes a predicate
//!   *expression tree*. Usable both for direct matching and for translation
//!   into an external declarative query representation.
//! - **Function-backed** ([`SpecFunction`]): wraps an opaque compiled
//!   callable. Only invocable; it cannot be decomposed back into tree form,
//!   so it can never participate in query translation.
//!
//! Combinators are defined for every combination of the two flavors.
//! Whenever a function-backed specification participates, the result is
//! function-backed; only two expression-backed specifications compose into
//! another expression-backed one. All combinators return new instances —
//! specifications are immutable and may be shared freely across threads.
//!
//! Reusable specifications are ordinary types implementing one of the two
//! traits:
//!
//! ```rust
//! use muster::{PredExpr, SpecExpression, SpecExpressionExt};
//!
//! struct Person {
//!     name: String,
//! }
//!
//! struct NameIs(&'static str);
//!
//! impl SpecExpression<Person> for NameIs {
//!     fn expression(&self) -> PredExpr<Person> {
//!         let name = self.0;
//!         PredExpr::new(move |p: &Person| p.name == name)
//!     }
//! }
//!
//! let anna = Person { name: "Anna".into() };
//! assert!(NameIs("Anna").matches(&anna));
//! assert!(NameIs("Bob").negate().matches(&anna));
//! ```

use std::sync::Arc;

use muster_expr::{and, or, PredExpr};

use crate::error::Result;
use crate::filter;

/// A compiled, opaque boolean predicate over `T`.
pub type PredFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A specification which exposes its predicate as an expression tree.
pub trait SpecExpression<T> {
    /// The predicate expression embodied by this specification.
    ///
    /// The returned tree is a cheap clone (leaves are `Arc`-shared); callers
    /// may rewrite or compose it without affecting this specification.
    fn expression(&self) -> PredExpr<T>;
}

/// A specification which exposes its predicate only as a compiled callable.
pub trait SpecFunction<T> {
    /// The predicate callable embodied by this specification.
    fn function(&self) -> PredFn<T>;
}

/// A dynamic expression-backed specification, wrapping a [`PredExpr`].
///
/// Prefer a named type implementing [`SpecExpression`] for logic worth
/// reusing; this wrapper suits one-off predicates and combinator results.
pub struct ExprSpec<T> {
    expr: PredExpr<T>,
}

impl<T> Clone for ExprSpec<T> {
    fn clone(&self) -> Self {
        ExprSpec {
            expr: self.expr.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ExprSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExprSpec").field("expr", &self.expr).finish()
    }
}

impl<T> ExprSpec<T> {
    /// Wraps an existing predicate expression.
    pub fn new(expr: PredExpr<T>) -> Self {
        ExprSpec { expr }
    }

    /// Builds a specification from a leaf test.
    pub fn from_test<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        ExprSpec {
            expr: PredExpr::new(test),
        }
    }
}

impl<T> SpecExpression<T> for ExprSpec<T> {
    fn expression(&self) -> PredExpr<T> {
        self.expr.clone()
    }
}

/// A dynamic function-backed specification, wrapping an arbitrary callable.
pub struct FnSpec<T> {
    func: PredFn<T>,
}

// Derived Clone would demand T: Clone; the callable is Arc-shared.
impl<T> Clone for FnSpec<T> {
    fn clone(&self) -> Self {
        FnSpec {
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> std::fmt::Debug for FnSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSpec").finish_non_exhaustive()
    }
}

impl<T> FnSpec<T> {
    /// Wraps an arbitrary predicate callable.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        FnSpec {
            func: Arc::new(func),
        }
    }

    /// Wraps an already-shared predicate callable.
    pub fn from_arc(func: PredFn<T>) -> Self {
        FnSpec { func }
    }
}

impl<T> SpecFunction<T> for FnSpec<T> {
    fn function(&self) -> PredFn<T> {
        Arc::clone(&self.func)
    }
}

/// Combinators and execution helpers for expression-backed specifications.
///
/// Blanket-implemented for every [`SpecExpression`]; nothing to implement.
pub trait SpecExpressionExt<T>: SpecExpression<T> {
    /// Tests whether a value satisfies this specification.
    fn matches(&self, value: &T) -> bool {
        self.expression().matches(value)
    }

    /// Compiles this specification's expression into a shareable callable.
    fn to_fn(&self) -> PredFn<T>
    where
        T: Send + Sync + 'static,
    {
        let expr = self.expression();
        Arc::new(move |value| expr.matches(value))
    }

    /// This specification, copied down to a function-backed one.
    ///
    /// One-way: the tree form is lost and the result can no longer be
    /// translated into a declarative query.
    fn to_fn_spec(&self) -> FnSpec<T>
    where
        T: Send + Sync + 'static,
    {
        FnSpec::from_arc(self.to_fn())
    }

    /// The logical complement of this specification (expression-backed).
    fn negate(&self) -> ExprSpec<T> {
        ExprSpec::new(self.expression().negate())
    }

    /// The conjunction of two expression-backed specifications.
    ///
    /// Fails if the underlying expressions declare different numbers of
    /// free variables.
    fn and<S>(&self, other: &S) -> Result<ExprSpec<T>>
    where
        S: SpecExpression<T> + ?Sized,
    {
        let expr = and(&self.expression(), &other.expression())?;
        Ok(ExprSpec::new(expr))
    }

    /// The alternation of two expression-backed specifications.
    fn or<S>(&self, other: &S) -> Result<ExprSpec<T>>
    where
        S: SpecExpression<T> + ?Sized,
    {
        let expr = or(&self.expression(), &other.expression())?;
        Ok(ExprSpec::new(expr))
    }

    /// The conjunction with a function-backed specification.
    ///
    /// The opaque participant forces a function-backed result.
    fn and_fn<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecFunction<T> + ?Sized,
        T: Send + Sync + 'static,
    {
        let first = self.to_fn();
        let second = other.function();
        FnSpec::new(move |value| first(value) && second(value))
    }

    /// The alternation with a function-backed specification.
    fn or_fn<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecFunction<T> + ?Sized,
        T: Send + Sync + 'static,
    {
        let first = self.to_fn();
        let second = other.function();
        FnSpec::new(move |value| first(value) || second(value))
    }

    /// Derives a specification over `B` via a projection from `B` to `T`.
    fn transform<B, S>(&self, selector: S) -> ExprSpec<B>
    where
        T: 'static,
        B: 'static,
        S: Fn(&B) -> T + Send + Sync + 'static,
    {
        ExprSpec::new(self.expression().transform(selector))
    }

    /// Filters a slice, returning references to matching items.
    fn filter<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        let expr = self.expression();
        filter::filter(items, |item| expr.matches(item))
    }

    /// Filters a slice and clones the matching items.
    fn filter_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let expr = self.expression();
        filter::filter_cloned(items, |item| expr.matches(item))
    }

    /// Finds the first matching item.
    fn find<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        let expr = self.expression();
        filter::find(items, |item| expr.matches(item))
    }

    /// The index of the first matching item.
    fn position(&self, items: &[T]) -> Option<usize> {
        let expr = self.expression();
        filter::position(items, |item| expr.matches(item))
    }

    /// Counts the matching items.
    fn count(&self, items: &[T]) -> usize {
        let expr = self.expression();
        filter::count(items, |item| expr.matches(item))
    }

    /// Returns `true` if any item matches.
    fn any(&self, items: &[T]) -> bool {
        let expr = self.expression();
        filter::any(items, |item| expr.matches(item))
    }

    /// Returns `true` if all items match.
    fn all(&self, items: &[T]) -> bool {
        let expr = self.expression();
        filter::all(items, |item| expr.matches(item))
    }
}

impl<T, S: SpecExpression<T> + ?Sized> SpecExpressionExt<T> for S {}

/// Combinators and execution helpers for function-backed specifications.
///
/// Blanket-implemented for every [`SpecFunction`]; nothing to implement.
/// Results are always function-backed — opaque callables cannot regain
/// tree form.
pub trait SpecFunctionExt<T>: SpecFunction<T> {
    /// Tests whether a value satisfies this specification.
    fn matches(&self, value: &T) -> bool {
        (self.function())(value)
    }

    /// The logical complement of this specification.
    fn negate(&self) -> FnSpec<T>
    where
        T: 'static,
    {
        let func = self.function();
        FnSpec::new(move |value| !func(value))
    }

    /// The conjunction with another function-backed specification.
    fn and<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecFunction<T> + ?Sized,
        T: 'static,
    {
        let first = self.function();
        let second = other.function();
        FnSpec::new(move |value| first(value) && second(value))
    }

    /// The alternation with another function-backed specification.
    fn or<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecFunction<T> + ?Sized,
        T: 'static,
    {
        let first = self.function();
        let second = other.function();
        FnSpec::new(move |value| first(value) || second(value))
    }

    /// The conjunction with an expression-backed specification.
    ///
    /// The expression participant is compiled; the result stays
    /// function-backed.
    fn and_expr<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecExpression<T> + ?Sized,
        T: Send + Sync + 'static,
    {
        let first = self.function();
        let second = other.to_fn();
        FnSpec::new(move |value| first(value) && second(value))
    }

    /// The alternation with an expression-backed specification.
    fn or_expr<S>(&self, other: &S) -> FnSpec<T>
    where
        S: SpecExpression<T> + ?Sized,
        T: Send + Sync + 'static,
    {
        let first = self.function();
        let second = other.to_fn();
        FnSpec::new(move |value| first(value) || second(value))
    }

    /// Derives a specification over `B` via a projection from `B` to `T`.
    ///
    /// Plain closure composition; the result is function-backed like its
    /// source and cannot regain tree form.
    fn transform<B, S>(&self, selector: S) -> FnSpec<B>
    where
        T: 'static,
        S: Fn(&B) -> T + Send + Sync + 'static,
    {
        let func = self.function();
        FnSpec::new(move |target: &B| func(&selector(target)))
    }

    /// Filters a slice, returning references to matching items.
    fn filter<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        let func = self.function();
        filter::filter(items, |item| func(item))
    }

    /// Filters a slice and clones the matching items.
    fn filter_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let func = self.function();
        filter::filter_cloned(items, |item| func(item))
    }

    /// Finds the first matching item.
    fn find<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        let func = self.function();
        filter::find(items, |item| func(item))
    }

    /// The index of the first matching item.
    fn position(&self, items: &[T]) -> Option<usize> {
        let func = self.function();
        filter::position(items, |item| func(item))
    }

    /// Counts the matching items.
    fn count(&self, items: &[T]) -> usize {
        let func = self.function();
        filter::count(items, |item| func(item))
    }

    /// Returns `true` if any item matches.
    fn any(&self, items: &[T]) -> bool {
        let func = self.function();
        filter::any(items, |item| func(item))
    }

    /// Returns `true` if all items match.
    fn all(&self, items: &[T]) -> bool {
        let func = self.function();
        filter::all(items, |item| func(item))
    }
}

impl<T, S: SpecFunction<T> + ?Sized> SpecFunctionExt<T> for S {}
