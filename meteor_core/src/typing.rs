// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed text reveal.
//!
//! A [`TypedSequence`] reveals an ordered list of lines into a [`TextSink`]
//! one character at a time:
//!
//! - each character is followed by a pause of `speed ± jitter` milliseconds,
//! - consecutive lines are separated by a line break and a longer pause,
//! - a sequence runs at most once; a second [`run`](TypedSequence::run)
//!   returns [`RunOutcome::AlreadyStarted`] without touching the sink.
//!
//! Starting is gated by visibility: backends observe the trigger element and
//! call [`should_start`](TypedSequence::should_start) with the visible ratio.

use core::cell::Cell;

use crate::time::Timer;

/// Timing parameters for a [`TypedSequence`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypingConfig {
    /// Base delay after each character, in milliseconds.
    pub speed_ms: u32,
    /// Maximum deviation from `speed_ms`, in milliseconds.
    pub jitter_ms: u32,
    /// Pause after a line break, in milliseconds.
    pub line_pause_ms: u32,
    /// Fraction of the trigger that must be visible before the reveal starts.
    pub visibility_threshold: f64,
    /// Delay before the backend starts observing the trigger, in milliseconds.
    pub start_delay_ms: u32,
}

impl TypingConfig {
    /// The pacing used throughout the demo pages.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            speed_ms: 60,
            jitter_ms: 10,
            line_pause_ms: 350,
            visibility_threshold: 0.6,
            start_delay_ms: 0,
        }
    }

    /// Returns a copy that waits `millis` before observing the trigger.
    #[must_use]
    pub const fn with_start_delay(mut self, millis: u32) -> Self {
        self.start_delay_ms = millis;
        self
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for revealed text.
pub trait TextSink {
    /// Appends `text` after everything revealed so far.
    fn append_text(&self, text: &str);

    /// Appends a line break.
    fn append_line_break(&self);

    /// Whether the sink still belongs to a live page.
    ///
    /// Once this returns `false` the sequence stops writing.
    fn is_attached(&self) -> bool {
        true
    }
}

/// Lifecycle of a [`TypedSequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    /// Waiting for the trigger.
    Idle,
    /// Characters are being revealed.
    Running,
    /// The reveal ended, either completed or detached.
    Finished,
}

/// How a call to [`TypedSequence::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every line was revealed.
    Completed,
    /// Another run had already claimed the sequence; nothing was written.
    AlreadyStarted,
    /// The sink detached mid-reveal; the remaining text was dropped.
    Detached,
}

/// An ordered set of lines revealed once, character by character.
#[derive(Debug)]
pub struct TypedSequence {
    lines: Vec<String>,
    config: TypingConfig,
    state: Cell<SequenceState>,
    rng: Cell<u64>,
}

const DEFAULT_SEED: u64 = 0x5EED_CAFE_F00D_D00D;

impl TypedSequence {
    /// Creates an idle sequence.
    #[must_use]
    pub fn new<I, S>(lines: I, config: TypingConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            config,
            state: Cell::new(SequenceState::Idle),
            rng: Cell::new(DEFAULT_SEED),
        }
    }

    /// Reseeds the jitter generator.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.rng.set(seed);
        self
    }

    /// The timing parameters.
    #[must_use]
    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SequenceState {
        self.state.get()
    }

    /// Whether a trigger that is `visible_ratio` visible should start the
    /// reveal.
    ///
    /// Only an idle sequence starts, and only once the ratio reaches the
    /// configured threshold.
    #[must_use]
    pub fn should_start(&self, visible_ratio: f64) -> bool {
        self.state.get() == SequenceState::Idle
            && visible_ratio >= self.config.visibility_threshold
    }

    /// Reveals every line into `sink`, sleeping on `timer` between characters.
    pub async fn run<S, T>(&self, sink: &S, timer: &T) -> RunOutcome
    where
        S: TextSink + ?Sized,
        T: Timer + ?Sized,
    {
        if self.state.get() != SequenceState::Idle {
            return RunOutcome::AlreadyStarted;
        }
        self.state.set(SequenceState::Running);
        let outcome = self.reveal(sink, timer).await;
        self.state.set(SequenceState::Finished);
        outcome
    }

    async fn reveal<S, T>(&self, sink: &S, timer: &T) -> RunOutcome
    where
        S: TextSink + ?Sized,
        T: Timer + ?Sized,
    {
        let mut buf = [0_u8; 4];
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                if !sink.is_attached() {
                    return RunOutcome::Detached;
                }
                sink.append_line_break();
                timer.sleep(self.config.line_pause_ms).await;
            }
            for ch in line.chars() {
                if !sink.is_attached() {
                    return RunOutcome::Detached;
                }
                sink.append_text(ch.encode_utf8(&mut buf));
                timer.sleep(self.next_char_delay()).await;
            }
        }
        RunOutcome::Completed
    }

    /// Next per-character delay, uniform in `[speed - jitter, speed + jitter)`.
    fn next_char_delay(&self) -> u32 {
        let span = u64::from(self.config.jitter_ms) * 2;
        if span == 0 {
            return self.config.speed_ms;
        }
        let mut state = self.rng.get();
        let sample = splitmix64(&mut state);
        self.rng.set(state);
        let offset = u32::try_from(sample % span).unwrap_or(0);
        self.config
            .speed_ms
            .saturating_sub(self.config.jitter_ms)
            .saturating_add(offset)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSink, RecordingTimer, TokioTimer};

    fn two_lines() -> TypedSequence {
        TypedSequence::new(["AB", "CD"], TypingConfig::new())
    }

    #[test]
    fn waits_for_visibility_threshold() {
        let seq = two_lines();
        assert!(!seq.should_start(0.0), "hidden trigger must not start");
        assert!(!seq.should_start(0.59), "below threshold must not start");
        assert!(seq.should_start(0.6), "threshold is inclusive");
        assert!(seq.should_start(1.0), "fully visible starts");
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_lines_with_break_between() {
        let seq = two_lines();
        let sink = RecordingSink::default();
        let outcome = seq.run(&sink, &TokioTimer).await;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(sink.contents(), "AB<br>CD");
        assert_eq!(seq.state(), SequenceState::Finished);
        assert!(!seq.should_start(1.0), "finished sequences never restart");
    }

    #[tokio::test(start_paused = true)]
    async fn paces_characters_and_line_pause() {
        let seq = two_lines().with_seed(7);
        let sink = RecordingSink::default();
        let timer = RecordingTimer::default();
        seq.run(&sink, &timer).await;

        let delays = timer.delays();
        assert_eq!(delays.len(), 5, "four characters and one line pause");
        assert_eq!(delays[2], 350, "line pause follows the first line");
        for (i, d) in delays.iter().enumerate().filter(|(i, _)| *i != 2) {
            assert!((50..70).contains(d), "delay {i} out of range: {d}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn total_duration_is_bounded() {
        let seq = two_lines();
        let sink = RecordingSink::default();
        let start = tokio::time::Instant::now();
        seq.run(&sink, &TokioTimer).await;
        let elapsed = start.elapsed().as_millis();
        assert!(
            (550..=630).contains(&elapsed),
            "unexpected total duration {elapsed}ms"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_runs_write_once() {
        let seq = two_lines();
        let sink = RecordingSink::default();
        let (first, second) = tokio::join!(
            seq.run(&sink, &TokioTimer),
            seq.run(&sink, &TokioTimer)
        );
        assert_eq!(first, RunOutcome::Completed);
        assert_eq!(second, RunOutcome::AlreadyStarted);
        assert_eq!(sink.contents(), "AB<br>CD");
    }

    #[tokio::test(start_paused = true)]
    async fn detached_sink_stops_silently() {
        let seq = TypedSequence::new(["Hello"], TypingConfig::new());
        let sink = RecordingSink::detaching_after(2);
        let outcome = seq.run(&sink, &TokioTimer).await;
        assert_eq!(outcome, RunOutcome::Detached);
        assert_eq!(sink.contents(), "He");
    }

    #[test]
    fn zero_jitter_is_constant() {
        let config = TypingConfig {
            jitter_ms: 0,
            ..TypingConfig::new()
        };
        let seq = TypedSequence::new(["x"], config);
        assert_eq!(seq.next_char_delay(), 60);
        assert_eq!(seq.next_char_delay(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn multibyte_characters_are_whole() {
        let seq = TypedSequence::new(["✓ ok"], TypingConfig::new());
        let sink = RecordingSink::default();
        seq.run(&sink, &RecordingTimer::default()).await;
        assert_eq!(sink.pieces(), ["✓", " ", "o", "k"]);
    }
}
