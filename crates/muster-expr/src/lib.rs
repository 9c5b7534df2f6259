//! Composable boolean predicate-expression trees.
//!
//! This crate is the engine underneath the `muster` specification library.
//! It represents a boolean-valued function over one free variable (the
//! "subject") as an immutable tree — [`Expr`] — wrapped together with its
//! declared parameter list as a [`PredExpr`], and provides three operations
//! over such trees:
//!
//! - **Composition** ([`and`], [`or`], [`not`]): two independently-authored
//!   predicates, each over its own free variable, are merged into a single
//!   tree over a unified variable. The second tree's variable references are
//!   rewritten onto the first's (see [`Rebinder`]) before the bodies are
//!   joined, so the result is one expression — suitable for evaluation
//!   engines that accept only one tree per filter clause.
//! - **Transformation** ([`PredExpr::transform`]): a predicate over `A` plus
//!   a projection `B -> A` yields a predicate over `B`, realized as an
//!   invoke-with-argument tree node rather than a nested closure.
//! - **Compilation** ([`PredExpr::to_fn`]): any tree compiles to a plain
//!   callable for eager in-memory filtering.
//!
//! # Quick start
//!
//! ```rust
//! use muster_expr::PredExpr;
//!
//! // Authored independently, against different formal parameters.
//! let positive = PredExpr::new(|n: &i64| *n > 0);
//! let even = PredExpr::new(|n: &i64| n % 2 == 0);
//!
//! let both = positive.and(&even)?;
//! assert!(both.matches(&4));
//! assert!(!both.matches(&3));
//!
//! // Negation and re-targeting onto another subject type.
//! let odd_or_negative = both.negate();
//! assert!(odd_or_negative.matches(&3));
//!
//! let first_even = both.transform(|v: &Vec<i64>| v[0]);
//! assert!(first_even.matches(&vec![4, 7]));
//! # Ok::<(), muster_expr::ExprError>(())
//! ```
//!
//! All values are immutable after construction; every operation returns a
//! new instance and shares leaf closures via `Arc`, so trees may be cloned
//! cheaply and evaluated from multiple threads concurrently.

mod compose;
mod error;
mod expr;
mod rebind;
mod transform;
mod var;

pub use compose::{and, compose, not, or};
pub use error::{ExprError, Result};
pub use expr::{Applied, Expr, PredExpr, TestFn};
pub use rebind::Rebinder;
pub use var::{Var, VarMap};
