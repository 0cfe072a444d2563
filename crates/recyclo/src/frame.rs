//! # Frame Driver
//!
//! Sequences one host frame over a world of entities:
//!
//! ```text
//! step()  ──►  draw()  ──►  clean()
//! ```
//!
//! An entity flagged during `step()` is still drawn this frame and evicted by
//! `clean()` at the end of it.

use recyclo_core::{Cleanable, Drawable, Steppable};

/// Runs a single frame without bookkeeping.
#[inline]
pub fn advance_frame<W>(world: &mut W)
where
    W: Steppable + Drawable + Cleanable,
{
    world.step();
    world.draw();
    world.clean();
}

/// Drives frames and counts them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameDriver {
    /// Frames completed so far.
    frame_count: u64,
}

impl FrameDriver {
    /// Creates a driver at frame zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { frame_count: 0 }
    }

    /// Runs one frame over `world`: step, draw, then clean.
    pub fn run_frame<W>(&mut self, world: &mut W)
    where
        W: Steppable + Drawable + Cleanable,
    {
        let span = tracing::trace_span!("frame", index = self.frame_count);
        let _enter = span.enter();

        advance_frame(world);
        self.frame_count += 1;
    }

    /// Runs `frames` consecutive frames over `world`.
    pub fn run_frames<W>(&mut self, world: &mut W, frames: u64)
    where
        W: Steppable + Drawable + Cleanable,
    {
        for _ in 0..frames {
            self.run_frame(world);
        }
    }

    /// Number of frames completed.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
