// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::collections::HashMap;

use serde_json::Value;

use crate::backend::Presenter;
use crate::media::{Playback, PlaybackError};
use crate::model::SimulationRequest;
use crate::time::Timer;
use crate::transport::{RawResponse, Transport, TransportError, TransportMode};
use crate::typing::TextSink;
use crate::view::{Behavior, Element, Field, Node, Region, Slot};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Sleeps on the tokio clock; pair with `start_paused = true`.
pub(crate) struct TokioTimer;

impl Timer for TokioTimer {
    async fn sleep(&self, millis: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(millis))).await;
    }
}

/// Records requested delays and resolves immediately.
#[derive(Default)]
pub(crate) struct RecordingTimer {
    delays: RefCell<Vec<u32>>,
}

impl RecordingTimer {
    pub(crate) fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }
}

impl Timer for RecordingTimer {
    async fn sleep(&self, millis: u32) {
        self.delays.borrow_mut().push(millis);
    }
}

// ---------------------------------------------------------------------------
// Typed text
// ---------------------------------------------------------------------------

/// Collects revealed text; line breaks are recorded as `<br>`.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pieces: RefCell<Vec<String>>,
    detach_after: Option<usize>,
}

impl RecordingSink {
    /// A sink that reports itself detached once `n` pieces were written.
    pub(crate) fn detaching_after(n: usize) -> Self {
        Self {
            pieces: RefCell::default(),
            detach_after: Some(n),
        }
    }

    pub(crate) fn pieces(&self) -> Vec<String> {
        self.pieces.borrow().clone()
    }

    pub(crate) fn contents(&self) -> String {
        self.pieces.borrow().concat()
    }
}

impl TextSink for RecordingSink {
    fn append_text(&self, text: &str) {
        self.pieces.borrow_mut().push(text.to_owned());
    }

    fn append_line_break(&self) {
        self.pieces.borrow_mut().push("<br>".to_owned());
    }

    fn is_attached(&self) -> bool {
        self.detach_after
            .is_none_or(|limit| self.pieces.borrow().len() < limit)
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// A media element that rejects a fixed number of `play()` calls.
pub(crate) struct FakePlayback {
    paused: Cell<bool>,
    rejections_left: Cell<u32>,
    attempts: Cell<u32>,
    fallbacks: Cell<u32>,
    armed: Cell<bool>,
}

impl FakePlayback {
    pub(crate) fn allowing() -> Self {
        Self::rejecting(0)
    }

    pub(crate) fn rejecting(times: u32) -> Self {
        Self {
            paused: Cell::new(true),
            rejections_left: Cell::new(times),
            attempts: Cell::new(0),
            fallbacks: Cell::new(0),
            armed: Cell::new(false),
        }
    }

    /// Simulates a user click anywhere in the document.
    pub(crate) fn click(&self) {
        if self.armed.replace(false) {
            self.attempts.set(self.attempts.get() + 1);
            self.paused.set(false);
        }
    }

    pub(crate) fn play_attempts(&self) -> u32 {
        self.attempts.get()
    }

    pub(crate) fn click_fallbacks(&self) -> u32 {
        self.fallbacks.get()
    }
}

impl Playback for FakePlayback {
    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        self.attempts.set(self.attempts.get() + 1);
        let left = self.rejections_left.get();
        if left > 0 {
            self.rejections_left.set(left - 1);
            return Err(PlaybackError("NotAllowedError".into()));
        }
        self.paused.set(false);
        Ok(())
    }

    fn play_on_next_click(&self) {
        self.fallbacks.set(self.fallbacks.get() + 1);
        self.armed.set(true);
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Replies with canned responses after an optional tokio-clock latency.
pub(crate) struct FakeTransport {
    simulation: RefCell<Result<RawResponse, TransportError>>,
    catalog: RefCell<Result<RawResponse, TransportError>>,
    latency_ms: Cell<u64>,
    requests: RefCell<Vec<SimulationRequest>>,
    catalog_calls: Cell<u32>,
}

impl FakeTransport {
    /// Replies to both calls with `value`.
    pub(crate) fn replying(value: Value) -> Self {
        Self::with(
            Ok(RawResponse::Structured(value.clone())),
            Ok(RawResponse::Structured(value)),
        )
    }

    /// Fails both calls with a request error.
    pub(crate) fn failing(message: &str) -> Self {
        let err = TransportError::Request(message.to_owned());
        Self::with(Err(err.clone()), Err(err))
    }

    fn with(
        simulation: Result<RawResponse, TransportError>,
        catalog: Result<RawResponse, TransportError>,
    ) -> Self {
        Self {
            simulation: RefCell::new(simulation),
            catalog: RefCell::new(catalog),
            latency_ms: Cell::new(0),
            requests: RefCell::default(),
            catalog_calls: Cell::new(0),
        }
    }

    pub(crate) fn set_simulation(&self, reply: Result<RawResponse, TransportError>) {
        *self.simulation.borrow_mut() = reply;
    }

    pub(crate) fn set_catalog(&self, reply: Result<RawResponse, TransportError>) {
        *self.catalog.borrow_mut() = reply;
    }

    pub(crate) fn set_latency(&self, millis: u64) {
        self.latency_ms.set(millis);
    }

    pub(crate) fn requests(&self) -> Vec<SimulationRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn catalog_calls(&self) -> u32 {
        self.catalog_calls.get()
    }

    async fn wait(&self) {
        let millis = self.latency_ms.get();
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

impl Transport for FakeTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Network
    }

    async fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.wait().await;
        self.simulation.borrow().clone()
    }

    async fn list_asteroids(&self) -> Result<RawResponse, TransportError> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        self.wait().await;
        self.catalog.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Keeps mounted trees and slot contents in memory.
#[derive(Default)]
pub(crate) struct RecordingPresenter {
    regions: RefCell<HashMap<Region, Element>>,
    slots: RefCell<HashMap<Slot, Vec<Element>>>,
    fields: RefCell<HashMap<Field, String>>,
    alerts: RefCell<Vec<String>>,
    scrolls: RefCell<Vec<Region>>,
}

impl RecordingPresenter {
    pub(crate) fn set_field(&self, field: Field, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_owned());
    }

    pub(crate) fn region(&self, region: Region) -> Option<Element> {
        self.regions.borrow().get(&region).cloned()
    }

    pub(crate) fn slot(&self, slot: Slot) -> Vec<Element> {
        self.slots.borrow().get(&slot).cloned().unwrap_or_default()
    }

    pub(crate) fn slot_text(&self, slot: Slot) -> String {
        self.slot(slot).iter().map(Element::text_content).collect()
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub(crate) fn scrolls(&self) -> Vec<Region> {
        self.scrolls.borrow().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn mount(&self, region: Region, content: Element) {
        self.unmount(region);
        let mut slots = self.slots.borrow_mut();
        for element in content.descendants() {
            if let Behavior::Slot(slot) = element.behavior {
                let children = element
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        Node::Element(e) => Some(e.clone()),
                        Node::Text(_) => None,
                    })
                    .collect();
                slots.insert(slot, children);
            }
        }
        self.regions.borrow_mut().insert(region, content);
    }

    fn unmount(&self, region: Region) {
        self.regions.borrow_mut().remove(&region);
        self.slots.borrow_mut().retain(|slot, _| slot.region() != region);
    }

    fn is_mounted(&self, region: Region) -> bool {
        self.regions.borrow().contains_key(&region)
    }

    fn fill(&self, slot: Slot, content: Vec<Element>) {
        if let Some(existing) = self.slots.borrow_mut().get_mut(&slot) {
            *existing = content;
        }
    }

    fn field_value(&self, field: Field) -> Option<String> {
        self.fields.borrow().get(&field).cloned()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn scroll_to(&self, region: Region) {
        self.scrolls.borrow_mut().push(region);
    }
}
