// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` timer.

use meteor_core::time::Timer;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// Direct global binding instead of `web_sys::Window` methods, so sleeping
// works without fetching (and unwrapping) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &js_sys::Function, millis: i32) -> i32;
}

/// A [`Timer`] backed by the browser's `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, millis: u32) {
        let delay = i32::try_from(millis).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            set_timeout(&resolve, delay);
        });
        // The promise never rejects.
        let _ = JsFuture::from(promise).await;
    }
}
