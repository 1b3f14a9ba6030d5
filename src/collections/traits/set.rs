use std::borrow::Borrow;
use std::iter::{Chain, FusedIterator};
use std::marker::PhantomData;

/// Set algebra shared by [`TreeSet`](crate::collections::binary_tree::TreeSet) and
/// [`HashSet`](crate::collections::hash::HashSet).
///
/// An implementor provides membership tests and iteration. Every algebra iterator is lazy and
/// built from those two alone: it walks one set and asks the other about each item, so its cost
/// is one `contains` per item visited. The in-place operators of each set type are usually
/// cheaper, because they can rely on that type's layout.
pub trait Set<T>: IntoIterator<Item = T> + Sized {
    type Iter<'a>: Iterator<Item = &'a T> where Self: 'a, T: 'a;

    fn contains(&self, item: &T) -> bool;

    fn iter<'a>(&'a self) -> Self::Iter<'a>;

    /// Items in `self` but not `other`, as references. (`self \ other`)
    fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, Self, T> {
        Filtered::new(self.iter(), other, false)
    }

    /// Consumes both sets, yielding the items of `self` which aren't in `other`.
    fn into_difference(self, other: Self) -> IntoDifference<Self, T> {
        Filtered::new(self.into_iter(), other, false)
    }

    /// Items in exactly one of `self` and `other`, as references. (`self △ other`)
    fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, Self, T> {
        self.difference(other).chain(other.difference(self))
    }

    /// Items in both `self` and `other`, as references. (`self ∩ other`)
    fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, Self, T> {
        Filtered::new(self.iter(), other, true)
    }

    /// Consumes both sets, yielding the items of `self` which are also in `other`.
    fn into_intersection(self, other: Self) -> IntoIntersection<Self, T> {
        Filtered::new(self.into_iter(), other, true)
    }

    /// Items in either `self` or `other`, as references, each yielded once. (`self ∪ other`)
    fn union<'a>(&'a self, other: &'a Self) -> Union<'a, Self, T> {
        self.iter().chain(other.difference(self))
    }

    /// Returns true if every item of `self` is in `other`. (`self ⊆ other`)
    fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|item| other.contains(item))
    }

    /// Returns true if every item of `other` is in `self`. (`self ⊇ other`)
    fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }
}

pub type Difference<'a, S, T> = Filtered<<S as Set<T>>::Iter<'a>, &'a S, S, T>;
pub type IntoDifference<S, T> = Filtered<<S as IntoIterator>::IntoIter, S, S, T>;
pub type Intersection<'a, S, T> = Filtered<<S as Set<T>>::Iter<'a>, &'a S, S, T>;
pub type IntoIntersection<S, T> = Filtered<<S as IntoIterator>::IntoIter, S, S, T>;
pub type SymmetricDifference<'a, S, T> = Chain<Difference<'a, S, T>, Difference<'a, S, T>>;
pub type Union<'a, S, T> = Chain<<S as Set<T>>::Iter<'a>, Difference<'a, S, T>>;

/// The items of one set, filtered by whether another set contains them.
///
/// `I` produces the items, either owned or borrowed, and `O` holds the other set, again either
/// owned or borrowed. Difference and intersection are the same walk, keeping the items the other
/// set lacks or has respectively.
pub struct Filtered<I, O, S, T> {
    items: I,
    other: O,
    keep_members: bool,
    _phantom: PhantomData<fn(&S, &T)>,
}

impl<I, O, S, T> Filtered<I, O, S, T> {
    const fn new(items: I, other: O, keep_members: bool) -> Filtered<I, O, S, T> {
        Filtered {
            items,
            other,
            keep_members,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, S, T> Iterator for Filtered<I, O, S, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
    O: Borrow<S>,
    S: Set<T>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let other: &S = self.other.borrow();
        let keep_members = self.keep_members;
        self.items.find(|item| other.contains(Borrow::<T>::borrow(item)) == keep_members)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

impl<I, O, S, T> FusedIterator for Filtered<I, O, S, T>
where
    I: FusedIterator,
    I::Item: Borrow<T>,
    O: Borrow<S>,
    S: Set<T>,
{
}
