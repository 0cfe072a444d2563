//! # Object Supply
//!
//! The unmanaged side of a pool: a store of spare instances with no
//! knowledge of their domain state.

use std::fmt;

use crate::config::PoolConfig;

/// A store of reusable instances.
///
/// Implementations hand out a stored instance when one is available and
/// construct a new one otherwise. They never run domain callbacks; that is
/// [`ObjectPool`](crate::ObjectPool)'s job.
pub trait ObjectSupply<T> {
    /// Returns a spare instance, constructing one if the store is empty.
    fn take(&mut self) -> T;

    /// Stores an instance for later reuse.
    ///
    /// Hands the instance back when the store is full. The caller drops it,
    /// outside of any borrow of the pool.
    fn restore(&mut self, item: T) -> Option<T>;

    /// Number of instances currently stored.
    fn available(&self) -> usize;
}

/// A LIFO free list backed by a factory.
///
/// # Example
///
/// ```rust
/// use recyclo_core::{FreeList, ObjectSupply};
///
/// let mut list = FreeList::new(|| vec![0u8; 16]);
/// let buffer = list.take();          // constructed
/// assert!(list.restore(buffer).is_none());
/// assert_eq!(list.available(), 1);
/// let _reused = list.take();         // reused, no allocation
/// assert_eq!(list.constructed(), 1);
/// ```
pub struct FreeList<T> {
    /// Spare instances, most recently released last.
    free: Vec<T>,
    /// Builds a new instance when `free` is empty.
    factory: Box<dyn FnMut() -> T>,
    /// Releases beyond this many stored instances are dropped.
    max_free: Option<usize>,
    /// Number of instances the factory has built.
    constructed: usize,
}

impl<T> FreeList<T> {
    /// Creates an empty free list.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::with_capacity(0, factory)
    }

    /// Creates an empty free list with room for `capacity` spares.
    pub fn with_capacity<F>(capacity: usize, factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self {
            free: Vec::with_capacity(capacity),
            factory: Box::new(factory),
            max_free: None,
            constructed: 0,
        }
    }

    /// Creates a free list sized and prewarmed from `config`.
    ///
    /// The config is assumed to be validated.
    pub fn from_config<F>(config: &PoolConfig, factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        let mut list = Self::with_capacity(config.initial_capacity, factory)
            .with_max_free(config.max_free);
        list.prewarm(config.prewarm);
        list
    }

    /// Caps the number of stored spares.
    #[must_use]
    pub fn with_max_free(mut self, max_free: Option<usize>) -> Self {
        self.max_free = max_free;
        self
    }

    /// Constructs `count` instances into the store, up to the cap.
    pub fn prewarm(&mut self, count: usize) {
        let room = self
            .max_free
            .map_or(count, |max| max.saturating_sub(self.free.len()).min(count));
        tracing::debug!(requested = count, constructing = room, "prewarming free list");

        self.free.reserve(room);
        for _ in 0..room {
            let item = (self.factory)();
            self.constructed += 1;
            self.free.push(item);
        }
    }

    /// Number of instances the factory has built.
    #[inline]
    #[must_use]
    pub const fn constructed(&self) -> usize {
        self.constructed
    }

    /// The cap on stored spares, if any.
    #[inline]
    #[must_use]
    pub const fn max_free(&self) -> Option<usize> {
        self.max_free
    }
}

impl<T> ObjectSupply<T> for FreeList<T> {
    fn take(&mut self) -> T {
        if let Some(item) = self.free.pop() {
            return item;
        }
        self.constructed += 1;
        (self.factory)()
    }

    fn restore(&mut self, item: T) -> Option<T> {
        if self.max_free.is_some_and(|max| self.free.len() >= max) {
            tracing::debug!(stored = self.free.len(), "free list full, rejecting released instance");
            return Some(item);
        }
        self.free.push(item);
        None
    }

    #[inline]
    fn available(&self) -> usize {
        self.free.len()
    }
}

impl<T> fmt::Debug for FreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeList")
            .field("available", &self.free.len())
            .field("max_free", &self.max_free)
            .field("constructed", &self.constructed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_list() -> FreeList<u32> {
        let next = Rc::new(Cell::new(0u32));
        FreeList::new(move || {
            let id = next.get();
            next.set(id + 1);
            id
        })
    }

    #[test]
    fn test_take_constructs_when_empty() {
        let mut list = counting_list();

        assert_eq!(list.take(), 0);
        assert_eq!(list.take(), 1);
        assert_eq!(list.constructed(), 2);
        assert_eq!(list.available(), 0);
    }

    #[test]
    fn test_restore_then_take_is_lifo() {
        let mut list = counting_list();
        let a = list.take();
        let b = list.take();

        assert_eq!(list.restore(a), None);
        assert_eq!(list.restore(b), None);

        assert_eq!(list.take(), b);
        assert_eq!(list.take(), a);
        assert_eq!(list.constructed(), 2);
    }

    #[test]
    fn test_max_free_drops_overflow() {
        let mut list = counting_list().with_max_free(Some(1));
        let a = list.take();
        let b = list.take();

        assert_eq!(list.restore(a), None);
        assert_eq!(list.restore(b), Some(b));

        assert_eq!(list.available(), 1);
        assert_eq!(list.take(), a);
    }

    #[test]
    fn test_prewarm_respects_cap() {
        let mut list = counting_list().with_max_free(Some(3));
        list.prewarm(10);

        assert_eq!(list.available(), 3);
        assert_eq!(list.constructed(), 3);
    }

    #[test]
    fn test_from_config() {
        let config = PoolConfig {
            initial_capacity: 8,
            prewarm: 4,
            max_free: Some(6),
        };
        let list = FreeList::from_config(&config, || 0u8);

        assert_eq!(list.available(), 4);
        assert_eq!(list.max_free(), Some(6));
    }
}
