//! # Ordered Container
//!
//! Insertion-ordered, growable storage that every other collection builds on.
//!
//! The container keeps its backing storage across `clear()` so a collection
//! that is refilled every frame stops allocating once it has reached its
//! peak size.

use crate::capability::{Cleanable, Drawable, RemovalFlag, Steppable};
use crate::error::{CollectionError, CollectionResult};

/// Default capacity hint used by `new()`.
pub const DEFAULT_CAPACITY: usize = 32;

/// An insertion-ordered sequence with loop helpers.
///
/// # Example
///
/// ```rust
/// use recyclo_core::OrderedContainer;
///
/// let mut numbers = OrderedContainer::with_capacity(4);
/// numbers.push(1);
/// numbers.push(2);
/// numbers.for_each(|n| *n *= 10);
/// assert_eq!(numbers.as_slice(), &[10, 20]);
/// ```
#[derive(Clone, Debug)]
pub struct OrderedContainer<T> {
    /// The live elements, `[0, len)`.
    items: Vec<T>,
    /// Removal flag for when the container itself is an entity.
    removal: RemovalFlag,
}

impl<T> OrderedContainer<T> {
    /// Creates an empty container with the default capacity hint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty container with room for `capacity` elements.
    ///
    /// The hint is not a ceiling; pushing past it grows the storage.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            removal: RemovalFlag::new(),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the size of the backing storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Appends an element at the end. Amortized O(1).
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Drops every element. The backing storage is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes every element in order, keeping the backing storage.
    #[inline]
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> CollectionResult<&T> {
        let length = self.items.len();
        self.items
            .get(index)
            .ok_or(CollectionError::IndexOutOfRange { index, length })
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> CollectionResult<&mut T> {
        let length = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, length })
    }

    /// Returns the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Iterates over the live elements in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over the live elements in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Calls `visitor` once per element, first to last.
    ///
    /// The visitor may flag elements for removal; eviction happens on the
    /// next cleanup pass, so no element is skipped.
    #[inline]
    pub fn for_each<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.items.iter_mut().for_each(visitor);
    }

    /// Calls `visitor` once per element, last to first.
    #[inline]
    pub fn for_each_rev<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.items.iter_mut().rev().for_each(visitor);
    }

    /// Calls `visitor` once for every unordered pair of distinct elements.
    ///
    /// Pairs are visited as `(items[i], items[j])` with `i < j`, ordered by
    /// `i` then `j`. Useful for mutual interactions such as collisions.
    pub fn round_robin<F: FnMut(&mut T, &mut T)>(&mut self, mut visitor: F) {
        let len = self.items.len();
        for i in 0..len {
            let (head, tail) = self.items.split_at_mut(i + 1);
            let current = &mut head[i];
            for other in tail {
                visitor(current, other);
            }
        }
    }

    /// Calls `visitor` for every `(self[i], other[j])` pair.
    pub fn nested_loop_join<U, F>(&mut self, other: &mut OrderedContainer<U>, mut visitor: F)
    where
        F: FnMut(&mut T, &mut U),
    {
        for item in &mut self.items {
            for other_item in &mut other.items {
                visitor(item, other_item);
            }
        }
    }

    /// Flags the container itself for removal from a parent collection.
    #[inline]
    pub fn mark_to_be_removed(&mut self) {
        self.removal.raise();
    }

    /// Sets the container's own removal flag.
    #[inline]
    pub fn set_to_be_removed(&mut self, value: bool) {
        self.removal.set(value);
    }

    /// Returns the container's own removal flag.
    #[inline]
    #[must_use]
    pub const fn removal_flag(&self) -> RemovalFlag {
        self.removal
    }

    /// Backing storage, for in-place compaction.
    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> Default for OrderedContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for OrderedContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for OrderedContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            removal: RemovalFlag::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OrderedContainer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

/// Cleans every child without evicting any of them.
///
/// A plain container has no eviction policy; use a
/// [`CompactingCollection`](crate::CompactingCollection) for that.
impl<T: Cleanable> Cleanable for OrderedContainer<T> {
    #[inline]
    fn is_to_be_removed(&self) -> bool {
        self.removal.is_raised()
    }

    fn clean(&mut self) {
        self.items.iter_mut().for_each(Cleanable::clean);
    }
}

impl<T: Steppable> Steppable for OrderedContainer<T> {
    fn step(&mut self) {
        self.items.iter_mut().for_each(Steppable::step);
    }
}

impl<T: Drawable> Drawable for OrderedContainer<T> {
    fn draw(&self) {
        self.items.iter().for_each(Drawable::draw);
    }
}
