//! # Compacting Collection
//!
//! A collection of [`Cleanable`] entities that evicts flagged entities once
//! per cleanup pass.
//!
//! ## Cleanup pass
//!
//! ```text
//! read ──► [A][B*][C][D*][E]        * = flagged after clean()
//!           │    ╲   │    ╲  │
//! write ──► [A][C][E]     recently_removed = [B, D]
//! ```
//!
//! One forward scan with a read cursor and a write cursor. Every entity is
//! cleaned (so nested collections are compacted first), then its flag is read.
//! Survivors are moved down to the write cursor, evictions are moved into
//! `recently_removed` in the order they were found. The pass is O(n) and
//! keeps the backing storage.

use crate::capability::{Cleanable, Drawable, RemovalFlag, Steppable};
use crate::container::OrderedContainer;
use crate::error::CollectionResult;

/// An ordered collection that evicts entities flagged for removal.
///
/// # Example
///
/// ```rust
/// use recyclo_core::{Cleanable, CompactingCollection, RemovalFlag};
///
/// struct Bullet { id: u32, removal: RemovalFlag }
///
/// impl Cleanable for Bullet {
///     fn is_to_be_removed(&self) -> bool { self.removal.is_raised() }
/// }
///
/// let mut bullets = CompactingCollection::with_capacity(8);
/// for id in 0..3 {
///     bullets.push(Bullet { id, removal: RemovalFlag::new() });
/// }
/// bullets.for_each(|b| if b.id == 1 { b.removal.raise() });
/// bullets.clean();
///
/// let live: Vec<u32> = bullets.iter().map(|b| b.id).collect();
/// assert_eq!(live, vec![0, 2]);
/// assert_eq!(bullets.recently_removed()[0].id, 1);
/// ```
#[derive(Clone, Debug)]
pub struct CompactingCollection<T> {
    /// Live entities, in insertion order.
    live: OrderedContainer<T>,
    /// Entities evicted by the last cleanup pass.
    recently_removed: OrderedContainer<T>,
}

impl<T> CompactingCollection<T> {
    /// Creates an empty collection with the default capacity hint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: OrderedContainer::new(),
            recently_removed: OrderedContainer::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: OrderedContainer::with_capacity(capacity),
            recently_removed: OrderedContainer::with_capacity(capacity),
        }
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if there are no live entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Appends an entity at the end of the live range.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.live.push(item);
    }

    /// Drops every live entity without running a cleanup pass.
    #[inline]
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Returns the live entity at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`](crate::CollectionError::IndexOutOfRange)
    /// if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> CollectionResult<&T> {
        self.live.get(index)
    }

    /// Returns the live entity at `index` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`](crate::CollectionError::IndexOutOfRange)
    /// if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> CollectionResult<&mut T> {
        self.live.get_mut(index)
    }

    /// Returns the live entities as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.live.as_slice()
    }

    /// Returns the live container.
    #[inline]
    #[must_use]
    pub fn live(&self) -> &OrderedContainer<T> {
        &self.live
    }

    /// Iterates over the live entities in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.live.iter()
    }

    /// Iterates mutably over the live entities in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.live.iter_mut()
    }

    /// Calls `visitor` once per live entity, first to last.
    #[inline]
    pub fn for_each<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.live.for_each(visitor);
    }

    /// Calls `visitor` once per live entity, last to first.
    #[inline]
    pub fn for_each_rev<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.live.for_each_rev(visitor);
    }

    /// Calls `visitor` once for every unordered pair of live entities.
    #[inline]
    pub fn round_robin<F: FnMut(&mut T, &mut T)>(&mut self, visitor: F) {
        self.live.round_robin(visitor);
    }

    /// Entities evicted by the most recent cleanup pass, in eviction order.
    ///
    /// Valid until the next pass.
    #[inline]
    #[must_use]
    pub fn recently_removed(&self) -> &[T] {
        self.recently_removed.as_slice()
    }

    /// Moves the evicted entities out, in eviction order.
    #[inline]
    pub fn drain_recently_removed(&mut self) -> std::vec::Drain<'_, T> {
        self.recently_removed.drain()
    }

    /// Moves every live entity out, in order.
    #[inline]
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.live.drain()
    }

    /// Flags the collection itself for removal from a parent collection.
    #[inline]
    pub fn mark_to_be_removed(&mut self) {
        self.live.mark_to_be_removed();
    }

    /// Sets the collection's own removal flag.
    #[inline]
    pub fn set_to_be_removed(&mut self, value: bool) {
        self.live.set_to_be_removed(value);
    }

    /// Returns the collection's own removal flag.
    #[inline]
    #[must_use]
    pub const fn removal_flag(&self) -> RemovalFlag {
        self.live.removal_flag()
    }
}

impl<T> Default for CompactingCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for CompactingCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.live.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a CompactingCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.live.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CompactingCollection<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.live.iter_mut()
    }
}

impl<T: Cleanable> Cleanable for CompactingCollection<T> {
    #[inline]
    fn is_to_be_removed(&self) -> bool {
        self.live.removal_flag().is_raised()
    }

    /// Runs one cleanup pass.
    ///
    /// Evictions from the previous pass are dropped first.
    fn clean(&mut self) {
        self.recently_removed.clear();

        // extract_if is the read/write cursor scan: survivors shift down in
        // place, evictions are yielded in discovery order.
        let evicted = self.live.storage_mut().extract_if(.., |item| {
            item.clean();
            item.is_to_be_removed()
        });
        self.recently_removed.extend(evicted);
    }
}

impl<T: Steppable> Steppable for CompactingCollection<T> {
    #[inline]
    fn step(&mut self) {
        self.live.step();
    }
}

impl<T: Drawable> Drawable for CompactingCollection<T> {
    #[inline]
    fn draw(&self) {
        self.live.draw();
    }
}
