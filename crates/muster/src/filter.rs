//! Eager execution of predicates against in-memory collections.
//!
//! These free functions are the shared execution layer behind the
//! specification extension traits; they are public so that call sites with
//! a bare closure can use them directly.

/// Filters a slice, returning references to matching items in order.
pub fn filter<'a, T, P>(items: &'a [T], pred: P) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| pred(item)).collect()
}

/// Filters a slice and clones the matching items.
pub fn filter_cloned<T, P>(items: &[T], pred: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| pred(item)).cloned().collect()
}

/// Finds the first matching item.
pub fn find<'a, T, P>(items: &'a [T], pred: P) -> Option<&'a T>
where
    P: Fn(&T) -> bool,
{
    items.iter().find(|item| pred(item))
}

/// Finds the index of the first matching item.
pub fn position<T, P>(items: &[T], pred: P) -> Option<usize>
where
    P: Fn(&T) -> bool,
{
    items.iter().position(|item| pred(item))
}

/// Counts the matching items.
pub fn count<T, P>(items: &[T], pred: P) -> usize
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| pred(item)).count()
}

/// Returns `true` if any item matches.
pub fn any<T, P>(items: &[T], pred: P) -> bool
where
    P: Fn(&T) -> bool,
{
    items.iter().any(|item| pred(item))
}

/// Returns `true` if all items match (vacuously true for an empty slice).
pub fn all<T, P>(items: &[T], pred: P) -> bool
where
    P: Fn(&T) -> bool,
{
    items.iter().all(|item| pred(item))
}
