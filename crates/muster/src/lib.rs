//! Composable specification objects for encapsulating query logic.
//!
//! A *specification* is a named, reusable object embodying a boolean
//! predicate over some subject type. Specifications give recurring business
//! rules a home: instead of scattering the same filter lambda across a
//! codebase, the rule gets a type, a name, and combinators.
//!
//! Two flavors exist, depending on what the specification can hand out:
//!
//! - [`SpecExpression`] exposes a [`PredExpr`] tree (from the companion
//!   `muster-expr` crate), which can be evaluated directly or handed off
//!   for translation into an external query representation.
//! - [`SpecFunction`] exposes only an opaque compiled callable — invocable,
//!   but never translatable.
//!
//! Combining the two flavors degrades to the weaker one: any combination
//! involving a function-backed participant yields a function-backed result.
//!
//! ```rust
//! use muster::{ExprSpec, SpecExpressionExt};
//!
//! #[derive(Clone)]
//! struct Person {
//!     name: String,
//!     identity: i64,
//! }
//!
//! let people = vec![
//!     Person { name: "Bob".into(), identity: 1 },
//!     Person { name: "Anna".into(), identity: 2 },
//!     Person { name: "Jo".into(), identity: 3 },
//! ];
//!
//! let named_anna = ExprSpec::from_test(|p: &Person| p.name == "Anna");
//! let id_below_three = ExprSpec::from_test(|p: &Person| p.identity < 3);
//!
//! let matched = named_anna.and(&id_below_three)?.filter(&people);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].name, "Anna");
//! # Ok::<(), muster::MusterError>(())
//! ```
//!
//! The crate also ships [`InMemoryStore`], [`InMemoryPersister`] and
//! [`NoOpTransaction`] — in-memory data-store doubles for exercising
//! specification-driven code in tests without real persistence.

mod error;
pub mod filter;
mod spec;
mod store;

pub use error::{MusterError, Result};
pub use spec::{
    ExprSpec, FnSpec, PredFn, SpecExpression, SpecExpressionExt, SpecFunction, SpecFunctionExt,
};
pub use store::{
    Identity, InMemoryPersister, InMemoryStore, NoOpTransaction, Persister, StoredItem,
    TransactionOutcome,
};

// Expression-layer types, re-exported so most users need only this crate.
pub use muster_expr::{Applied, Expr, ExprError, PredExpr, Rebinder, TestFn, Var, VarMap};
