//! # Entity Capabilities
//!
//! Collections are generic over what their entities can do:
//!
//! - [`Cleanable`] - carries a removal flag; required by compacting collections
//! - [`Steppable`] - advances one simulation step
//! - [`Drawable`] - renders itself
//! - [`Sprite`] - both of the above
//!
//! An entity may implement any combination. A particle is usually all three.

/// An entity that can be flagged for removal.
///
/// `clean()` is called once per cleanup pass, before the flag is read.
/// Entities that own nested collections clean them here and may raise their
/// own flag as a result (e.g. a group whose last member just died).
pub trait Cleanable {
    /// Returns `true` if the entity should be evicted on the next cleanup pass.
    fn is_to_be_removed(&self) -> bool;

    /// Cleans nested collections and re-evaluates the removal flag.
    ///
    /// The default does nothing.
    #[inline]
    fn clean(&mut self) {}
}

/// An entity that advances one simulation step per frame.
pub trait Steppable {
    /// Advances the entity by one step.
    fn step(&mut self);
}

/// An entity that renders itself.
pub trait Drawable {
    /// Draws the entity.
    fn draw(&self);
}

/// An entity that can be both stepped and drawn.
pub trait Sprite: Steppable + Drawable {}

impl<T: Steppable + Drawable + ?Sized> Sprite for T {}

impl<T: Cleanable + ?Sized> Cleanable for Box<T> {
    #[inline]
    fn is_to_be_removed(&self) -> bool {
        (**self).is_to_be_removed()
    }

    #[inline]
    fn clean(&mut self) {
        (**self).clean();
    }
}

impl<T: Steppable + ?Sized> Steppable for Box<T> {
    #[inline]
    fn step(&mut self) {
        (**self).step();
    }
}

impl<T: Drawable + ?Sized> Drawable for Box<T> {
    #[inline]
    fn draw(&self) {
        (**self).draw();
    }
}

/// A removal flag for embedding in entity structs.
///
/// Defaults to not flagged. Once raised it stays raised until [`reset`]
/// (usually from a pool's acquire callback).
///
/// [`reset`]: RemovalFlag::reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct RemovalFlag(bool);

impl RemovalFlag {
    /// Creates an unflagged value.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(false)
    }

    /// Returns `true` if the flag has been raised.
    #[inline]
    #[must_use]
    pub const fn is_raised(self) -> bool {
        self.0
    }

    /// Raises the flag.
    #[inline]
    pub fn raise(&mut self) {
        self.0 = true;
    }

    /// Sets the flag to `value`.
    #[inline]
    pub fn set(&mut self, value: bool) {
        self.0 = value;
    }

    /// Lowers the flag.
    #[inline]
    pub fn reset(&mut self) {
        self.0 = false;
    }
}
