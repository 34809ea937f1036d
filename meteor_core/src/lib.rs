// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View state, typed-text sequencing, and transport normalization for the
//! Meteor asteroid-impact demo.
//!
//! `meteor_core` is the platform-neutral half of the demo client. It decides
//! *what* the page shows and *when*; backend crates decide *how* that reaches
//! a real document.
//!
//! # Architecture
//!
//! ```text
//!   user click ──► Controller::dispatch(Action)
//!                        │
//!        ┌───────────────┼──────────────────────────┐
//!        ▼               ▼                          ▼
//!   validation     SimulationApi<T: Transport>   pages::* (Element trees)
//!   (alert)              │                          │
//!                        ▼                          ▼
//!               RawResponse ──► normalize ──► Presenter::mount / fill
//! ```
//!
//! **[`controller`]**: Explicit view state machine. Owns the API adapter and
//! the presenter, validates form input, and replaces page regions wholesale.
//!
//! **[`api`]** and **[`transport`]**: One asynchronous capability interface
//! ([`Transport`](transport::Transport)) with network and bridge strategies
//! supplied by backends. Response normalization lives in
//! [`SimulationApi`](api::SimulationApi), never at call sites.
//!
//! **[`typing`]**: Visibility-gated, non-reentrant typed text reveal.
//!
//! **[`media`]**: Autoplay video description and the layered retry policy.
//!
//! **[`view`]**: Backend-neutral element tree produced by [`pages`].
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait that
//! platform backends implement.
//!
//! **[`format`]**: Fixed-decimal rendering of dynamic values.
//!
//! **[`config`]**, **[`scenario`]**, **[`intro`]**: Configuration presets and
//! compiled-in page content.

pub mod api;
pub mod backend;
pub mod config;
pub mod controller;
pub mod format;
pub mod intro;
pub mod media;
pub mod model;
pub mod pages;
pub mod scenario;
pub mod time;
pub mod transport;
pub mod typing;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
