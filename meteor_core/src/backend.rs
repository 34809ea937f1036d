// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The demo splits platform-specific work into *backend* crates. A backend
//! provides:
//!
//! - **Presenter**: Implements [`Presenter`] to turn [`Element`] trees into
//!   live platform UI and to read user input back.
//!
//! - **Timer**: Implements [`Timer`](crate::time::Timer) for typed text
//!   pacing and delayed autoplay.
//!
//! - **Transports**: Implement [`Transport`](crate::transport::Transport)
//!   for each way the host can reach the simulation service.
//!
//! # Crate boundaries
//!
//! `meteor_core` owns view state, content, validation and normalization.
//! Backend crates depend on `meteor_core` and provide platform glue.
//! Application code depends on both and wires them together at startup.

use crate::view::{Element, Field, Region, Slot};

/// Applies view trees to a platform-native document.
///
/// Both the DOM presenter and test doubles implement this trait. Every method
/// takes `&self`; presenters that keep state use interior mutability. Writes
/// aimed at a region or slot that no longer exists are silently dropped.
///
/// # Transition pseudocode
///
/// ```rust,ignore
/// presenter.unmount(Region::Workspace);
/// presenter.mount(Region::Workspace, pages::workspace(&config, form));
/// presenter.scroll_to(Region::Workspace);
/// // ... later, after the service replies ...
/// presenter.fill(Slot::WorkspaceContent, vec![pages::results(&result)]);
/// ```
pub trait Presenter {
    /// Appends `content` as region `region`, replacing any existing one.
    fn mount(&self, region: Region, content: Element);

    /// Removes region `region` if present.
    fn unmount(&self, region: Region);

    /// Whether region `region` is present.
    fn is_mounted(&self, region: Region) -> bool;

    /// Replaces the children of `slot` with `content`.
    fn fill(&self, slot: Slot, content: Vec<Element>);

    /// Current value of the input bound to `field`, if it exists.
    fn field_value(&self, field: Field) -> Option<String>;

    /// Shows a blocking notice.
    fn alert(&self, message: &str);

    /// Scrolls `region` into view.
    fn scroll_to(&self, region: Region);
}
