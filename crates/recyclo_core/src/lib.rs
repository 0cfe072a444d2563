//! # RECYCLO Core
//!
//! Managed collections and object pools for frame-driven simulations:
//! - Particle systems with tens of thousands of short-lived entities
//! - Zero reallocation once collections reach their peak size
//! - Entities that die mid-frame are still drawn once, then recycled
//!
//! ## Architecture
//!
//! ```text
//! OrderedContainer<T>             push / for_each / get / clear
//! └── CompactingCollection<T>     + clean(): evict flagged, keep order
//!     └── PooledCollection<T, S>  + evictions released to a SharedPool
//!
//! ObjectPool<T, S>                acquire / release / release_all
//! └── S: ObjectSupply<T>          FreeList<T> by default
//! ```
//!
//! Every collection implements [`Steppable`] and [`Drawable`] when its
//! entities do, and [`Cleanable`] so collections nest inside entities.
//!
//! ## Example
//!
//! ```rust
//! use recyclo_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Particle { life: u32, removal: RemovalFlag }
//!
//! impl Cleanable for Particle {
//!     fn is_to_be_removed(&self) -> bool { self.removal.is_raised() }
//! }
//!
//! impl Steppable for Particle {
//!     fn step(&mut self) {
//!         self.life = self.life.saturating_sub(1);
//!         if self.life == 0 { self.removal.raise(); }
//!     }
//! }
//!
//! let pool = ObjectPool::from_factory(Particle::default)
//!     .on_acquire(|p: &mut Particle| { p.life = 2; p.removal.reset(); })
//!     .into_shared();
//! let mut particles = PooledCollection::new(pool);
//! particles.spawn_with(|_| {});
//!
//! particles.step();
//! particles.clean();
//! assert_eq!(particles.len(), 1);
//!
//! particles.step();
//! particles.clean();
//! assert!(particles.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod capability;
pub mod compacting;
pub mod config;
pub mod container;
pub mod error;
pub mod pool;
pub mod pooled;

pub use capability::{Cleanable, Drawable, RemovalFlag, Sprite, Steppable};
pub use compacting::CompactingCollection;
pub use config::PoolConfig;
pub use container::OrderedContainer;
pub use error::{CollectionError, CollectionResult};
pub use pool::{
    acquire_shared, release_shared, FreeList, ObjectPool, ObjectSupply, PoolStats, SharedPool,
};
pub use pooled::PooledCollection;

/// Glob import for the capability traits and collection types.
pub mod prelude {
    pub use crate::capability::{Cleanable, Drawable, RemovalFlag, Sprite, Steppable};
    pub use crate::compacting::CompactingCollection;
    pub use crate::container::OrderedContainer;
    pub use crate::pool::{ObjectPool, ObjectSupply, SharedPool};
    pub use crate::pooled::PooledCollection;
}
