//! # Pooled Collection
//!
//! A [`CompactingCollection`] bound to a [`SharedPool`]. Every entity evicted
//! by a cleanup pass is released back to the pool instead of being dropped.
//!
//! ## Two-phase cleanup
//!
//! 1. **Evict** - the compacting pass runs to completion, collecting evictions.
//! 2. **Release** - evictions are released to the pool in discovery order.
//!
//! The pool is not touched until every eviction of the pass is known. Each
//! release goes through [`release_shared`], so the pool's release callback
//! may recycle nested collections drawing from the same pool.
//!
//! Dropping a collection releases its live entities the same way.

use crate::capability::{Cleanable, Drawable, RemovalFlag, Steppable};
use crate::compacting::CompactingCollection;
use crate::config::PoolConfig;
use crate::error::CollectionResult;
use crate::pool::{acquire_shared, release_shared, FreeList, ObjectSupply, SharedPool};

/// A compacting collection that recycles its evictions.
///
/// # Panics
///
/// `clean()`, `spawn_with()`, `push()` and `recycle_all()` borrow the shared
/// pool briefly. Calling them while the caller itself holds a borrow of the
/// pool panics. Pool callbacks run unborrowed and may call them freely.
///
/// Dropping the collection releases its live entities to the pool. If the
/// pool is borrowed at that moment they are dropped instead and stay counted
/// as outstanding.
///
/// # Example
///
/// ```rust
/// use recyclo_core::{Cleanable, ObjectPool, PooledCollection, RemovalFlag};
///
/// #[derive(Default)]
/// struct Spark { removal: RemovalFlag }
///
/// impl Cleanable for Spark {
///     fn is_to_be_removed(&self) -> bool { self.removal.is_raised() }
/// }
///
/// let pool = ObjectPool::from_factory(Spark::default)
///     .on_acquire(|s: &mut Spark| s.removal.reset())
///     .into_shared();
/// let mut sparks = PooledCollection::new(pool.clone());
///
/// sparks.spawn_with(|_| {});
/// sparks.spawn_with(|s| s.removal.raise());
/// sparks.clean();
///
/// assert_eq!(sparks.len(), 1);
/// assert_eq!(sparks.last_recycled(), 1);
/// assert_eq!(pool.borrow().stats().free, 1);
/// ```
pub struct PooledCollection<T, S: ObjectSupply<T> = FreeList<T>> {
    /// Live entities and the per-pass eviction list.
    collection: CompactingCollection<T>,
    /// Where evictions go.
    pool: SharedPool<T, S>,
    /// Evictions released by the last pass.
    last_recycled: usize,
}

impl<T, S: ObjectSupply<T>> PooledCollection<T, S> {
    /// Creates an empty collection bound to `pool`.
    #[must_use]
    pub fn new(pool: SharedPool<T, S>) -> Self {
        Self::from_parts(CompactingCollection::new(), pool)
    }

    /// Creates an empty collection with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(pool: SharedPool<T, S>, capacity: usize) -> Self {
        Self::from_parts(CompactingCollection::with_capacity(capacity), pool)
    }

    /// Creates an empty collection sized from `config`.
    #[must_use]
    pub fn with_config(pool: SharedPool<T, S>, config: &PoolConfig) -> Self {
        Self::with_capacity(pool, config.initial_capacity)
    }

    fn from_parts(collection: CompactingCollection<T>, pool: SharedPool<T, S>) -> Self {
        Self {
            collection,
            pool,
            last_recycled: 0,
        }
    }

    /// The pool this collection releases into.
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &SharedPool<T, S> {
        &self.pool
    }

    /// Acquires an instance from the pool, lets `init` set it up, and appends it.
    pub fn spawn_with<F: FnOnce(&mut T)>(&mut self, init: F) {
        let mut item = acquire_shared(&self.pool);
        init(&mut item);
        self.collection.push(item);
    }

    /// Appends an entity at the end of the live range.
    ///
    /// The entity was not acquired from the pool, so the pool records it as
    /// adopted; it is released there like any other.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.pool.borrow_mut().adopt();
        self.collection.push(item);
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Returns `true` if there are no live entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Returns the live entity at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`](crate::CollectionError::IndexOutOfRange)
    /// if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> CollectionResult<&T> {
        self.collection.get(index)
    }

    /// Returns the live entity at `index` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`](crate::CollectionError::IndexOutOfRange)
    /// if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> CollectionResult<&mut T> {
        self.collection.get_mut(index)
    }

    /// Returns the live entities as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.collection.as_slice()
    }

    /// Iterates over the live entities in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.collection.iter()
    }

    /// Iterates mutably over the live entities in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.collection.iter_mut()
    }

    /// Calls `visitor` once per live entity, first to last.
    #[inline]
    pub fn for_each<F: FnMut(&mut T)>(&mut self, visitor: F) {
        self.collection.for_each(visitor);
    }

    /// Calls `visitor` once for every unordered pair of live entities.
    #[inline]
    pub fn round_robin<F: FnMut(&mut T, &mut T)>(&mut self, visitor: F) {
        self.collection.round_robin(visitor);
    }

    /// Number of entities released to the pool by the last cleanup pass.
    #[inline]
    #[must_use]
    pub const fn last_recycled(&self) -> usize {
        self.last_recycled
    }

    /// Releases every live entity to the pool, in order, and empties the
    /// collection.
    pub fn recycle_all(&mut self) {
        let mut released = 0usize;
        for item in self.collection.drain() {
            release_shared(&self.pool, item);
            released += 1;
        }
        tracing::debug!(released, "recycled every live entity");
    }

    /// Flags the collection itself for removal from a parent collection.
    #[inline]
    pub fn mark_to_be_removed(&mut self) {
        self.collection.mark_to_be_removed();
    }

    /// Sets the collection's own removal flag.
    #[inline]
    pub fn set_to_be_removed(&mut self, value: bool) {
        self.collection.set_to_be_removed(value);
    }

    /// Returns the collection's own removal flag.
    #[inline]
    #[must_use]
    pub const fn removal_flag(&self) -> RemovalFlag {
        self.collection.removal_flag()
    }
}

impl<'a, T, S: ObjectSupply<T>> IntoIterator for &'a PooledCollection<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.iter()
    }
}

impl<T: Cleanable, S: ObjectSupply<T>> Cleanable for PooledCollection<T, S> {
    #[inline]
    fn is_to_be_removed(&self) -> bool {
        self.collection.is_to_be_removed()
    }

    /// Runs one cleanup pass and releases the evictions.
    fn clean(&mut self) {
        self.collection.clean();

        let mut recycled = 0usize;
        for item in self.collection.drain_recently_removed() {
            release_shared(&self.pool, item);
            recycled += 1;
        }
        self.last_recycled = recycled;

        tracing::trace!(live = self.collection.len(), recycled, "pooled clean");
    }
}

impl<T: Steppable, S: ObjectSupply<T>> Steppable for PooledCollection<T, S> {
    #[inline]
    fn step(&mut self) {
        self.collection.step();
    }
}

impl<T: Drawable, S: ObjectSupply<T>> Drawable for PooledCollection<T, S> {
    #[inline]
    fn draw(&self) {
        self.collection.draw();
    }
}

impl<T, S: ObjectSupply<T>> Drop for PooledCollection<T, S> {
    fn drop(&mut self) {
        if self.collection.is_empty() {
            return;
        }
        if self.pool.try_borrow_mut().is_err() {
            tracing::debug!(
                live = self.collection.len(),
                "pool busy on drop, live entities are not recycled"
            );
            return;
        }
        self.recycle_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ObjectPool;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Shard {
        serial: u32,
        removal: RemovalFlag,
    }

    impl Cleanable for Shard {
        fn is_to_be_removed(&self) -> bool {
            self.removal.is_raised()
        }
    }

    fn shard_pool(released: &Rc<RefCell<Vec<u32>>>) -> SharedPool<Shard> {
        let log = Rc::clone(released);
        ObjectPool::from_factory(Shard::default)
            .on_acquire(|s: &mut Shard| s.removal.reset())
            .on_release(move |s: &mut Shard| log.borrow_mut().push(s.serial))
            .into_shared()
    }

    #[test]
    fn test_clean_releases_evictions_in_order() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::with_capacity(Rc::clone(&pool), 4);

        for (serial, flagged) in [(1, false), (2, true), (3, false), (4, true)] {
            shards.spawn_with(|s| {
                s.serial = serial;
                s.removal.set(flagged);
            });
        }
        shards.clean();

        let live: Vec<u32> = shards.iter().map(|s| s.serial).collect();
        assert_eq!(live, vec![1, 3]);
        assert_eq!(*released.borrow(), vec![2, 4]);
        assert_eq!(shards.last_recycled(), 2);
        assert_eq!(pool.borrow().stats().free, 2);
    }

    #[test]
    fn test_recycled_instances_come_back_unflagged() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::new(Rc::clone(&pool));

        shards.spawn_with(|s| s.removal.raise());
        shards.clean();
        assert!(shards.is_empty());

        shards.spawn_with(|_| {});
        assert!(!shards.get(0).unwrap().is_to_be_removed());
        assert_eq!(pool.borrow().stats().reused, 1);
    }

    #[test]
    fn test_clean_with_nothing_flagged_releases_nothing() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::new(pool);
        shards.spawn_with(|s| s.serial = 9);

        shards.clean();

        assert_eq!(shards.len(), 1);
        assert_eq!(shards.last_recycled(), 0);
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn test_recycle_all() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::new(Rc::clone(&pool));
        for serial in 0..3 {
            shards.spawn_with(|s| s.serial = serial);
        }

        shards.recycle_all();

        assert!(shards.is_empty());
        assert_eq!(*released.borrow(), vec![0, 1, 2]);
        assert_eq!(pool.borrow().stats().outstanding, 0);
    }

    #[test]
    fn test_two_collections_share_one_pool() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut left = PooledCollection::new(Rc::clone(&pool));
        let mut right = PooledCollection::new(Rc::clone(&pool));

        left.spawn_with(|s| s.removal.raise());
        left.clean();
        right.spawn_with(|_| {});

        let stats = pool.borrow().stats();
        assert_eq!(stats.constructed_on_acquire, 1);
        assert_eq!(stats.reused, 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn test_pushed_entities_are_adopted() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::new(Rc::clone(&pool));

        for (serial, flagged) in [(1, false), (2, true), (3, false)] {
            let mut removal = RemovalFlag::new();
            removal.set(flagged);
            shards.push(Shard { serial, removal });
        }
        shards.clean();

        let stats = pool.borrow().stats();
        assert_eq!(stats.adopted, 3);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.outstanding, 2);
        assert_eq!(shards.len(), 2);
    }

    #[test]
    fn test_drop_releases_live_entities() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        {
            let mut shards = PooledCollection::new(Rc::clone(&pool));
            for serial in 0..2 {
                shards.spawn_with(|s| s.serial = serial);
            }
        }

        assert_eq!(*released.borrow(), vec![0, 1]);
        assert_eq!(pool.borrow().stats().outstanding, 0);
    }

    #[test]
    fn test_drop_with_pool_borrowed_does_not_panic() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let pool = shard_pool(&released);
        let mut shards = PooledCollection::new(Rc::clone(&pool));
        shards.spawn_with(|_| {});

        let guard = pool.borrow();
        drop(shards);
        drop(guard);

        assert!(released.borrow().is_empty());
        assert_eq!(pool.borrow().stats().outstanding, 1);
    }

    /// A tree whose nodes and children share one pool.
    #[derive(Default)]
    struct Node {
        children: Option<PooledCollection<Node>>,
        removal: RemovalFlag,
    }

    impl Cleanable for Node {
        fn is_to_be_removed(&self) -> bool {
            self.removal.is_raised()
        }

        fn clean(&mut self) {
            if let Some(children) = self.children.as_mut() {
                children.clean();
            }
        }
    }

    fn node_pool() -> SharedPool<Node> {
        ObjectPool::from_factory(Node::default)
            .on_acquire(|n: &mut Node| n.removal.reset())
            .on_release(|n: &mut Node| {
                if let Some(children) = n.children.as_mut() {
                    children.recycle_all();
                }
            })
            .into_shared()
    }

    #[test]
    fn test_release_callback_recycles_children_into_same_pool() {
        let pool = node_pool();
        let mut roots = PooledCollection::new(Rc::clone(&pool));
        roots.spawn_with(|_| {});

        let mut children = PooledCollection::new(Rc::clone(&pool));
        children.spawn_with(|_| {});
        children.spawn_with(|_| {});
        let root = roots.get_mut(0).unwrap();
        root.children = Some(children);
        root.removal.raise();

        roots.clean();

        assert!(roots.is_empty());
        assert_eq!(roots.last_recycled(), 1);
        let stats = pool.borrow().stats();
        assert_eq!(stats.constructed_on_acquire, 3);
        assert_eq!(stats.released, 3);
        assert_eq!(stats.outstanding, 0);
        assert_eq!(stats.free, 3);
    }

    #[test]
    fn test_recycle_all_recycles_nested_children_into_same_pool() {
        let pool = node_pool();
        let mut roots = PooledCollection::new(Rc::clone(&pool));
        for _ in 0..2 {
            let mut children = PooledCollection::new(Rc::clone(&pool));
            children.spawn_with(|_| {});
            roots.spawn_with(|n| n.children = Some(children));
        }

        roots.recycle_all();

        let stats = pool.borrow().stats();
        assert_eq!(stats.released, 4);
        assert_eq!(stats.outstanding, 0);
    }
}
