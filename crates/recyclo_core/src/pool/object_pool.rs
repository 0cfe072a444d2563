//! # Object Pool
//!
//! Orchestrates an [`ObjectSupply`] with acquire/release callbacks.
//!
//! ## Re-entrant callbacks
//!
//! A [`SharedPool`] is a `RefCell`. [`acquire_shared`] and [`release_shared`]
//! hold the borrow only while the supply is touched; the callbacks run with
//! the pool unborrowed, so a release callback may recycle nested children
//! into the same pool.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::supply::{FreeList, ObjectSupply};
use crate::config::PoolConfig;
use crate::container::OrderedContainer;

/// Callback run on an instance as it enters or leaves the pool.
type Hook<T> = Rc<dyn Fn(&mut T)>;

/// A pool shared between the code that acquires and the collections that
/// release on cleanup. Single-threaded.
pub type SharedPool<T, S = FreeList<T>> = Rc<RefCell<ObjectPool<T, S>>>;

/// Counters for pool activity.
///
/// Instances built by [`FreeList::prewarm`] are not counted here; see
/// [`FreeList::constructed`] for the factory total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Acquires that found the supply empty and had to construct.
    pub constructed_on_acquire: u64,
    /// Acquires served from the supply.
    pub reused: u64,
    /// Instances that entered circulation without an acquire, through
    /// [`ObjectPool::adopt`] or [`PooledCollection::push`](crate::PooledCollection::push).
    pub adopted: u64,
    /// Instances handed back through a release.
    pub released: u64,
    /// Instances acquired or adopted and not yet released.
    ///
    /// Releasing an instance that was never acquired or adopted makes the
    /// count undercount; it is clamped at zero.
    pub outstanding: u64,
    /// Instances currently stored in the supply.
    pub free: usize,
}

/// A pool of reusable instances.
///
/// The pool does not know the entity's fields. It only guarantees that
/// `on_acquire` runs on every instance it hands out and `on_release` runs on
/// every instance it takes back.
///
/// # Example
///
/// ```rust
/// use recyclo_core::{ObjectPool, RemovalFlag};
///
/// #[derive(Default)]
/// struct Particle { life: u32, removal: RemovalFlag }
///
/// let mut pool = ObjectPool::from_factory(Particle::default)
///     .on_acquire(|p: &mut Particle| {
///         p.life = 60;
///         p.removal.reset();
///     });
///
/// let particle = pool.acquire();
/// assert_eq!(particle.life, 60);
/// pool.release(particle);
/// assert_eq!(pool.stats().free, 1);
/// ```
pub struct ObjectPool<T, S = FreeList<T>> {
    /// Spare instances.
    supply: S,
    /// Runs after an instance leaves the supply.
    on_acquire: Option<Hook<T>>,
    /// Runs before an instance enters the supply.
    on_release: Option<Hook<T>>,
    constructed_on_acquire: u64,
    reused: u64,
    adopted: u64,
    released: u64,
}

impl<T> ObjectPool<T, FreeList<T>> {
    /// Creates a pool over an empty [`FreeList`] built from `factory`.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::new(FreeList::new(factory))
    }

    /// Creates a pool over a [`FreeList`] sized and prewarmed from `config`.
    pub fn from_config<F>(config: &PoolConfig, factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::new(FreeList::from_config(config, factory))
    }
}

impl<T, S: ObjectSupply<T>> ObjectPool<T, S> {
    /// Creates a pool over `supply` with no callbacks.
    pub fn new(supply: S) -> Self {
        Self {
            supply,
            on_acquire: None,
            on_release: None,
            constructed_on_acquire: 0,
            reused: 0,
            adopted: 0,
            released: 0,
        }
    }

    /// Sets the callback run on every acquired instance.
    #[must_use]
    pub fn on_acquire<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + 'static,
    {
        self.on_acquire = Some(Rc::new(hook));
        self
    }

    /// Sets the callback run on every released instance.
    #[must_use]
    pub fn on_release<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + 'static,
    {
        self.on_release = Some(Rc::new(hook));
        self
    }

    /// Returns a ready-to-use instance.
    ///
    /// Reuses a stored instance when there is one, otherwise constructs one.
    /// The acquire callback runs in both cases.
    pub fn acquire(&mut self) -> T {
        let mut item = self.take_counted();
        if let Some(hook) = self.on_acquire.as_deref() {
            hook(&mut item);
        }
        item
    }

    /// Takes an instance back. The release callback runs before it is stored.
    pub fn release(&mut self, mut item: T) {
        if let Some(hook) = self.on_release.as_deref() {
            hook(&mut item);
        }
        let _overflow = self.restore_counted(item);
    }

    /// Releases every element of `container`, first to last, leaving it empty.
    pub fn release_all(&mut self, container: &mut OrderedContainer<T>) {
        for item in container.drain() {
            self.release(item);
        }
    }

    /// Records an instance that entered circulation without an acquire and
    /// will be released into this pool later.
    #[inline]
    pub fn adopt(&mut self) {
        self.adopted += 1;
    }

    /// Returns a snapshot of the pool counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let issued = self.constructed_on_acquire + self.reused + self.adopted;
        PoolStats {
            constructed_on_acquire: self.constructed_on_acquire,
            reused: self.reused,
            adopted: self.adopted,
            released: self.released,
            outstanding: issued.saturating_sub(self.released),
            free: self.supply.available(),
        }
    }

    /// Read-only access to the underlying supply.
    #[inline]
    #[must_use]
    pub fn supply(&self) -> &S {
        &self.supply
    }

    /// Wraps the pool for sharing with [`PooledCollection`](crate::PooledCollection)s.
    #[must_use]
    pub fn into_shared(self) -> SharedPool<T, S> {
        Rc::new(RefCell::new(self))
    }

    /// Takes an instance from the supply and counts it. No callback runs.
    fn take_counted(&mut self) -> T {
        let reusing = self.supply.available() > 0;
        let item = self.supply.take();
        if reusing {
            self.reused += 1;
            tracing::trace!(free = self.supply.available(), "pool acquire: reused");
        } else {
            self.constructed_on_acquire += 1;
            tracing::trace!(
                constructed = self.constructed_on_acquire,
                "pool acquire: constructed"
            );
        }
        item
    }

    /// Stores an instance and counts it. No callback runs.
    fn restore_counted(&mut self, item: T) -> Option<T> {
        self.released += 1;
        self.supply.restore(item)
    }
}

/// Acquires from a shared pool.
///
/// The pool is borrowed only to take the instance; the acquire callback runs
/// after the borrow ends, so it may acquire from the same pool.
///
/// # Panics
///
/// Panics if the pool is already borrowed by the caller.
#[must_use]
pub fn acquire_shared<T, S: ObjectSupply<T>>(pool: &SharedPool<T, S>) -> T {
    let (mut item, hook) = {
        let mut pool = pool.borrow_mut();
        (pool.take_counted(), pool.on_acquire.clone())
    };
    if let Some(hook) = hook {
        hook(&mut item);
    }
    item
}

/// Releases into a shared pool.
///
/// The release callback runs before the pool is borrowed, so it may release
/// nested instances into the same pool. An instance the supply rejects is
/// dropped after the borrow ends.
///
/// # Panics
///
/// Panics if the pool is already borrowed by the caller.
pub fn release_shared<T, S: ObjectSupply<T>>(pool: &SharedPool<T, S>, mut item: T) {
    let hook = pool.borrow().on_release.clone();
    if let Some(hook) = hook {
        hook(&mut item);
    }
    let overflow = pool.borrow_mut().restore_counted(item);
    drop(overflow);
}

impl<T, S: fmt::Debug> fmt::Debug for ObjectPool<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("supply", &self.supply)
            .field("on_acquire", &self.on_acquire.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("constructed_on_acquire", &self.constructed_on_acquire)
            .field("reused", &self.reused)
            .field("adopted", &self.adopted)
            .field("released", &self.released)
            .finish()
    }
}
