//! Free-variable identities and the transient binding map.
//!
//! A [`Var`] stands for the formal parameter of a predicate expression —
//! the "subject placeholder" that leaf tests are written against. Two
//! expressions authored independently will carry different `Var`s even when
//! both test the same subject type; the composer reconciles them by
//! rewriting one expression's variables to the other's (see
//! [`crate::Rebinder`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The identity of a free variable within a predicate expression.
///
/// Identity is a globally unique id; the optional label exists only for
/// `Debug` output and never participates in equality or hashing. Copyable
/// and cheap to pass around.
///
/// # Example
///
/// ```
/// use muster_expr::Var;
///
/// let x = Var::labeled("x");
/// let p = Var::labeled("p");
/// assert_ne!(x, p);
/// assert_eq!(x, x);
/// ```
#[derive(Clone, Copy)]
pub struct Var {
    id: u64,
    label: Option<&'static str>,
}

impl Var {
    /// Creates a fresh, unlabeled variable with a unique identity.
    pub fn fresh() -> Self {
        Var {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            label: None,
        }
    }

    /// Creates a fresh variable carrying a debug label.
    pub fn labeled(label: &'static str) -> Self {
        Var {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            label: Some(label),
        }
    }

    /// Returns the debug label, if one was given at creation.
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl std::hash::Hash for Var {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label.unwrap_or("_"), self.id)
    }
}

/// A transient mapping from source variable identities to destination
/// identities, built for a single composition or transformation call and
/// discarded afterwards.
pub type VarMap = HashMap<Var, Var>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_vars_are_distinct() {
        let a = Var::fresh();
        let b = Var::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn label_does_not_affect_identity() {
        let a = Var::labeled("x");
        let b = Var::labeled("x");
        assert_ne!(a, b);
        assert_eq!(a.label(), Some("x"));
    }

    #[test]
    fn copies_compare_equal() {
        let a = Var::labeled("p");
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn debug_renders_label_and_id() {
        let v = Var::labeled("x");
        let rendered = format!("{v:?}");
        assert!(rendered.starts_with("x#"));

        let anon = Var::fresh();
        assert!(format!("{anon:?}").starts_with("_#"));
    }

    #[test]
    fn usable_as_map_key() {
        let a = Var::fresh();
        let b = Var::fresh();
        let mut map = VarMap::new();
        map.insert(a, b);
        assert_eq!(map.get(&a), Some(&b));
        assert_eq!(map.get(&b), None);
    }
}
