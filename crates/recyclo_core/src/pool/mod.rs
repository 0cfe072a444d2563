//! # Object Pools
//!
//! Reuse of entity instances across frames.
//!
//! ```text
//! ObjectPool<T, S>
//! ├── S: ObjectSupply<T>   (unmanaged store of spare instances, e.g. FreeList)
//! ├── on_acquire callback  (reset domain state, lower the removal flag)
//! └── on_release callback  (tear down before the instance is stored)
//! ```
//!
//! Instances move by value: `acquire()` hands ownership to the caller and
//! `release()` takes it back, so one instance can never be leased twice.
//!
//! Shared pools go through [`acquire_shared`] and [`release_shared`], which
//! run the callbacks with the pool unborrowed.

mod object_pool;
mod supply;

pub use object_pool::{acquire_shared, release_shared, ObjectPool, PoolStats, SharedPool};
pub use supply::{FreeList, ObjectSupply};
