// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplaying background video.
//!
//! Browsers refuse unmuted or unsolicited playback in various ways, so every
//! video the demo builds is silent, inline and looping, and playback is
//! attempted from three independent triggers:
//!
//! - [`play_when_ready`] once the first frame has loaded; a rejection is
//!   logged and arms a one-shot click fallback,
//! - the click fallback itself (armed through [`Playback::play_on_next_click`]),
//! - [`retry_after_delay`], [`DELAYED_PLAY_MS`] after construction, if the
//!   element is still paused.
//!
//! Calling `play()` on a playing element is harmless, so the triggers need no
//! coordination.

use log::{debug, warn};

use crate::time::Timer;

/// MIME type declared on every video source.
pub const VIDEO_MIME: &str = "video/mp4";

/// Delay before the second playback attempt, in milliseconds.
pub const DELAYED_PLAY_MS: u32 = 500;

/// Source and styling of a background video.
///
/// The flags are not configurable: every video is muted, looping, inline,
/// autoplaying and preloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSpec {
    /// URL of the single `<source>`.
    pub src: String,
    /// CSS class applied to the `<video>` element.
    pub class: String,
    /// MIME type of the source.
    pub mime: &'static str,
}

impl VideoSpec {
    /// Creates an MP4 video description.
    #[must_use]
    pub fn new(src: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            class: class.into(),
            mime: VIDEO_MIME,
        }
    }
}

/// A playback attempt was rejected by the platform.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("playback rejected: {0}")]
pub struct PlaybackError(pub String);

/// The parts of a media element the autoplay policy drives.
pub trait Playback {
    /// Whether the element is currently paused.
    fn is_paused(&self) -> bool;

    /// Attempts to start playback.
    fn play(&self) -> impl Future<Output = Result<(), PlaybackError>>;

    /// Arranges for a single `play()` on the next click anywhere in the
    /// document.
    fn play_on_next_click(&self);
}

/// Result of one autoplay trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayOutcome {
    /// Playback started.
    Playing,
    /// The element was already playing; nothing was attempted.
    AlreadyPlaying,
    /// Playback was rejected and a click fallback is armed.
    AwaitingClick,
    /// Playback was rejected; the failure was logged.
    Rejected,
}

/// Attempts playback after the first frame has loaded.
///
/// A rejection is logged and swallowed, and a one-shot click fallback is
/// armed.
pub async fn play_when_ready<P: Playback + ?Sized>(media: &P) -> AutoplayOutcome {
    match media.play().await {
        Ok(()) => AutoplayOutcome::Playing,
        Err(err) => {
            warn!("Video autoplay failed: {err}");
            media.play_on_next_click();
            AutoplayOutcome::AwaitingClick
        }
    }
}

/// Waits [`DELAYED_PLAY_MS`] and retries playback if the element is still
/// paused.
pub async fn retry_after_delay<P, T>(media: &P, timer: &T) -> AutoplayOutcome
where
    P: Playback + ?Sized,
    T: Timer + ?Sized,
{
    timer.sleep(DELAYED_PLAY_MS).await;
    if !media.is_paused() {
        return AutoplayOutcome::AlreadyPlaying;
    }
    match media.play().await {
        Ok(()) => {
            debug!("delayed video play succeeded");
            AutoplayOutcome::Playing
        }
        Err(err) => {
            warn!("Delayed play failed: {err}");
            AutoplayOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlayback, RecordingTimer};

    #[test]
    fn specs_are_mp4() {
        let spec = VideoSpec::new("./assit/videos/a.mp4", "Earth");
        assert_eq!(spec.mime, "video/mp4");
        assert_eq!(spec.class, "Earth");
    }

    #[tokio::test(start_paused = true)]
    async fn ready_play_success_arms_nothing() {
        let video = FakePlayback::allowing();
        assert_eq!(play_when_ready(&video).await, AutoplayOutcome::Playing);
        assert_eq!(video.click_fallbacks(), 0);
        assert!(!video.is_paused(), "video should be playing");
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_play_arms_exactly_one_click_fallback() {
        let video = FakePlayback::rejecting(1);
        assert_eq!(play_when_ready(&video).await, AutoplayOutcome::AwaitingClick);
        assert_eq!(video.click_fallbacks(), 1);

        // The fallback fires on the first click and plays.
        video.click();
        assert!(!video.is_paused(), "click fallback should start playback");
        video.click();
        assert_eq!(video.play_attempts(), 2, "fallback is one-shot");
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_retry_skips_playing_video() {
        let video = FakePlayback::allowing();
        play_when_ready(&video).await;
        let timer = RecordingTimer::default();
        assert_eq!(
            retry_after_delay(&video, &timer).await,
            AutoplayOutcome::AlreadyPlaying
        );
        assert_eq!(timer.delays(), [DELAYED_PLAY_MS]);
        assert_eq!(video.play_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_retry_plays_paused_video() {
        let video = FakePlayback::rejecting(1);
        play_when_ready(&video).await;
        let timer = RecordingTimer::default();
        assert_eq!(
            retry_after_delay(&video, &timer).await,
            AutoplayOutcome::Playing
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_retry_failure_is_swallowed() {
        let video = FakePlayback::rejecting(5);
        let timer = RecordingTimer::default();
        assert_eq!(
            retry_after_delay(&video, &timer).await,
            AutoplayOutcome::Rejected
        );
        assert!(video.is_paused(), "rejected video stays paused");
    }
}
