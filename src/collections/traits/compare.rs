use std::borrow::Borrow;
use std::cmp::Ordering;

/// A three-way comparison between a `L`, usually a key being looked up, and a `R`, usually a
/// value stored in an ordered collection.
///
/// Ordered collections take a comparator as a value rather than relying on [`Ord`] alone, so the
/// same type can be stored under different orderings. Any closure taking two references and
/// returning an [`Ordering`] is a comparator:
/// ```
/// # use korin_containers::collections::binary_tree::RBTree;
/// let mut tree = RBTree::with_compare(|a: &i32, b: &i32| b.cmp(a));
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
/// assert!(tree.iter().eq(&[3, 2, 1]));
/// ```
pub trait Compare<L: ?Sized, R: ?Sized = L> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &L, right: &R) -> Ordering;
}

/// The natural order of a type, as given by [`Ord`].
///
/// Through [`Borrow`], a stored `T` can also be compared against any `Q` it borrows as, so that a
/// collection of [`String`]s can be searched with a `&str`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<Q, T> Compare<Q, T> for Natural
where
    Q: Ord + ?Sized,
    T: Borrow<Q>,
{
    fn compare(&self, left: &Q, right: &T) -> Ordering {
        left.cmp(right.borrow())
    }
}

impl<L: ?Sized, R: ?Sized, F> Compare<L, R> for F
where
    F: Fn(&L, &R) -> Ordering,
{
    fn compare(&self, left: &L, right: &R) -> Ordering {
        self(left, right)
    }
}

/// A comparator over key-value pairs which only looks at the key, using the inner comparator.
///
/// Pairs can be compared with each other, and bare keys can be compared against pairs. This is
/// what lets a [`TreeMap`](crate::collections::binary_tree::TreeMap) store `(K, V)` in a tree
/// while looking entries up by `K`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FindPair<C>(pub C);

impl<C> FindPair<C> {
    /// Returns the comparator used for keys.
    pub const fn keys(&self) -> &C {
        &self.0
    }
}

impl<K, V, C: Compare<K>> Compare<(K, V)> for FindPair<C> {
    fn compare(&self, left: &(K, V), right: &(K, V)) -> Ordering {
        self.0.compare(&left.0, &right.0)
    }
}

impl<K, V, C: Compare<K>> Compare<K, (K, V)> for FindPair<C> {
    fn compare(&self, left: &K, right: &(K, V)) -> Ordering {
        self.0.compare(left, &right.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_borrowed() {
        let owned = String::from("b");
        assert_eq!(Natural.compare("a", &owned), Ordering::Less);
        assert_eq!(Natural.compare("b", &owned), Ordering::Equal);
        assert_eq!(Natural.compare(&3, &2), Ordering::Greater);
    }

    #[test]
    fn test_find_pair() {
        let cmp = FindPair(Natural);
        assert_eq!(cmp.compare(&(1, "z"), &(2, "a")), Ordering::Less);
        assert_eq!(cmp.compare(&(2, "z"), &(2, "a")), Ordering::Equal);
        assert_eq!(cmp.compare(&3, &(2, "a")), Ordering::Greater);
    }

    #[test]
    fn test_closure() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
    }
}
