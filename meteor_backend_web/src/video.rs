// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplaying `<video>` elements.

use log::warn;
use meteor_core::media::{Playback, PlaybackError, VideoSpec, play_when_ready, retry_after_delay};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AddEventListenerOptions, Document, Event, HtmlSourceElement, HtmlVideoElement};

use crate::describe_js_error;
use crate::timer::BrowserTimer;

/// A [`Playback`] over an `HtmlVideoElement`.
#[derive(Clone, Debug)]
pub struct VideoHandle {
    video: HtmlVideoElement,
}

impl VideoHandle {
    /// Wraps `video`.
    #[must_use]
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl Playback for VideoHandle {
    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        let promise = self
            .video
            .play()
            .map_err(|err| PlaybackError(describe_js_error(&err)))?;
        JsFuture::from(promise)
            .await
            .map(drop)
            .map_err(|err| PlaybackError(describe_js_error(&err)))
    }

    fn play_on_next_click(&self) {
        let Some(document) = self.video.owner_document() else {
            return;
        };
        let video = self.video.clone();
        // Freed after the first click.
        let on_click = Closure::once_into_js(move |_event: Event| {
            let _ = video.play();
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "click",
                on_click.unchecked_ref(),
                &options,
            )
            .is_err()
        {
            warn!("could not arm click-to-play fallback");
        }
    }
}

/// Builds a muted, looping, inline, autoplaying video for `spec`.
///
/// Playback is attempted when the first frame loads and again
/// [`DELAYED_PLAY_MS`](meteor_core::media::DELAYED_PLAY_MS) later if the
/// element is still paused.
pub fn build_video(document: &Document, spec: &VideoSpec) -> Result<HtmlVideoElement, JsValue> {
    let video: HtmlVideoElement = document.create_element("video")?.unchecked_into();
    video.class_list().add_1(&spec.class)?;

    let source: HtmlSourceElement = document.create_element("source")?.unchecked_into();
    source.set_src(&spec.src);
    source.set_type(spec.mime);
    video.append_child(&source)?;

    video.set_attribute("playsinline", "")?;
    video.set_attribute("webkit-playsinline", "")?;
    video.set_muted(true);
    video.set_loop(true);
    video.set_preload("auto");
    video.set_autoplay(true);

    // The listener finds its video through the event so that it holds no
    // reference to the element, and frees itself after the first frame.
    let on_loaded = Closure::once_into_js(|event: Event| {
        let Some(video) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlVideoElement>().ok())
        else {
            return;
        };
        let handle = VideoHandle::new(video);
        spawn_local(async move {
            play_when_ready(&handle).await;
        });
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    video.add_event_listener_with_callback_and_add_event_listener_options(
        "loadeddata",
        on_loaded.unchecked_ref(),
        &options,
    )?;

    let handle = VideoHandle::new(video.clone());
    spawn_local(async move {
        retry_after_delay(&handle, &BrowserTimer).await;
    });

    video.load();
    Ok(video)
}

/// Mutes every `<video>` already in the document and tries to play it, with
/// the click fallback on rejection.
pub fn prime_existing_videos(document: &Document) -> Result<(), JsValue> {
    let videos = document.query_selector_all("video")?;
    for i in 0..videos.length() {
        let Some(node) = videos.item(i) else {
            continue;
        };
        let Ok(video) = node.dyn_into::<HtmlVideoElement>() else {
            continue;
        };
        video.set_muted(true);
        let handle = VideoHandle::new(video);
        spawn_local(async move {
            play_when_ready(&handle).await;
        });
    }
    Ok(())
}
