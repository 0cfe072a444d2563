//! # RECYCLO
//!
//! Pooled sprite collections for creative-coding runtimes.
//!
//! The host calls [`FrameDriver::run_frame`] once per frame. Everything
//! else - eviction, recycling, ordering - is handled by the collections in
//! [`recyclo_core`].
//!
//! ## Example
//!
//! ```rust
//! use recyclo::prelude::*;
//!
//! #[derive(Default)]
//! struct Spark { life: u32, removal: RemovalFlag }
//!
//! impl Steppable for Spark {
//!     fn step(&mut self) {
//!         self.life = self.life.saturating_sub(1);
//!         if self.life == 0 { self.removal.raise(); }
//!     }
//! }
//! impl Drawable for Spark {
//!     fn draw(&self) {}
//! }
//! impl Cleanable for Spark {
//!     fn is_to_be_removed(&self) -> bool { self.removal.is_raised() }
//! }
//!
//! let pool = ObjectPool::from_factory(Spark::default)
//!     .on_acquire(|s: &mut Spark| { s.life = 3; s.removal.reset(); })
//!     .into_shared();
//! let mut sparks = PooledCollection::new(pool);
//! sparks.spawn_with(|_| {});
//!
//! let mut driver = FrameDriver::new();
//! driver.run_frames(&mut sparks, 3);
//! assert!(sparks.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod frame;

pub use frame::{advance_frame, FrameDriver};
pub use recyclo_core::{
    acquire_shared, capability, compacting, config, container, error, pool, pooled, release_shared, Cleanable,
    CollectionError, CollectionResult, CompactingCollection, Drawable, FreeList, ObjectPool,
    ObjectSupply, OrderedContainer, PoolConfig, PoolStats, PooledCollection, RemovalFlag,
    SharedPool, Sprite, Steppable,
};

/// Glob import for the capability traits, collections and frame driver.
pub mod prelude {
    pub use crate::frame::{advance_frame, FrameDriver};
    pub use recyclo_core::prelude::*;
}
