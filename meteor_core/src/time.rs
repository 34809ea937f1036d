// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer capability.
//!
//! Everything in the core that waits (typed text pacing, the delayed autoplay
//! retry) waits through a [`Timer`]. The web backend supplies a `setTimeout`
//! implementation; tests supply one backed by a paused tokio clock.

/// Suspends the current task for a number of milliseconds.
pub trait Timer {
    /// Returns a future that resolves after `millis` milliseconds.
    fn sleep(&self, millis: u32) -> impl Future<Output = ()>;
}
