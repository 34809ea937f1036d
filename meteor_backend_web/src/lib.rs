// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for the Meteor demo.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomPresenter`]: builds DOM nodes from view trees and reads inputs back
//! - [`BrowserTimer`]: `setTimeout`-backed [`Timer`](meteor_core::time::Timer)
//! - [`bind_typing`]: `IntersectionObserver` trigger for typed text
//! - [`build_video`] and [`prime_existing_videos`]: autoplaying `<video>`
//! - [`FetchTransport`], [`BridgeTransport`] and [`WebTransport`]: the two
//!   ways to reach the simulation service

mod presenter;
mod timer;
mod transport;
mod typing;
mod video;

pub use meteor_core::backend::Presenter;
pub use presenter::{DomPresenter, markup_attributes};
pub use timer::BrowserTimer;
pub use transport::{BridgeTransport, FetchTransport, WebTransport};
pub use typing::{DomTextSink, TypingBinding, bind_typing};
pub use video::{VideoHandle, build_video, prime_existing_videos};

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "String")]
    fn js_string(value: &JsValue) -> String;
}

/// Text of a thrown JavaScript value, as `String(value)` renders it.
///
/// Errors come out as `Name: message`, e.g. `TypeError: Failed to fetch`.
#[must_use]
pub fn describe_js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| js_string(value))
}
