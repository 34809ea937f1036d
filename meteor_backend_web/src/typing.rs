// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-triggered typed text.
//!
//! [`bind_typing`] attaches a [`TypedSequence`] to a target element and starts
//! it once an `IntersectionObserver` reports the trigger element at least
//! [`visibility_threshold`](meteor_core::typing::TypingConfig) visible.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use meteor_core::time::Timer as _;
use meteor_core::typing::{TextSink, TypedSequence};
use meteor_core::view::TypedText;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::describe_js_error;
use crate::timer::BrowserTimer;

/// Writes revealed text into a DOM element.
///
/// Once the element leaves the document the sink reports itself detached and
/// the sequence stops.
#[derive(Clone, Debug)]
pub struct DomTextSink {
    target: Element,
}

impl DomTextSink {
    /// Creates a sink that appends to `target`.
    #[must_use]
    pub fn new(target: Element) -> Self {
        Self { target }
    }
}

impl TextSink for DomTextSink {
    fn append_text(&self, text: &str) {
        let _ = self.target.insert_adjacent_text("beforeend", text);
    }

    fn append_line_break(&self) {
        if let Some(doc) = self.target.owner_document()
            && let Ok(br) = doc.create_element("br")
        {
            let _ = self.target.append_child(&br);
        }
    }

    fn is_attached(&self) -> bool {
        self.target.is_connected()
    }
}

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A registered observer and the callback it invokes.
struct Watch {
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[derive(Default)]
struct BindingState {
    cancelled: Cell<bool>,
    watch: RefCell<Option<Watch>>,
}

/// Handle to a pending typed-text reveal.
///
/// The observer keeps itself alive until the reveal starts or the binding is
/// [cancelled](Self::cancel), so dropping the handle leaves it running.
#[derive(Clone)]
pub struct TypingBinding {
    state: Rc<BindingState>,
}

impl core::fmt::Debug for TypingBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypingBinding")
            .field("cancelled", &self.state.cancelled.get())
            .field("observing", &self.is_observing())
            .finish()
    }
}

impl TypingBinding {
    /// Stops waiting for visibility and releases the observer.
    ///
    /// A reveal already in progress ends on its own once its target leaves the
    /// document.
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
        self.release();
    }

    /// Whether an observer is currently registered.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.state.watch.borrow().is_some()
    }

    fn release(&self) {
        // Taken out first so the observer's drop runs without the borrow held.
        let watch = self.state.watch.borrow_mut().take();
        drop(watch);
    }
}

/// Reveals `text` into `target` once `trigger` becomes visible enough.
///
/// Observation starts after the text's configured start delay. The reveal
/// runs at most once.
pub fn bind_typing(target: Element, trigger: Element, text: &TypedText) -> TypingBinding {
    let binding = TypingBinding {
        state: Rc::default(),
    };
    let sequence = Rc::new(
        TypedSequence::new(text.lines.iter().cloned(), text.config)
            .with_seed(js_sys::Math::random().to_bits()),
    );
    let delay = text.config.start_delay_ms;
    let pending = binding.clone();
    spawn_local(async move {
        if delay > 0 {
            BrowserTimer.sleep(delay).await;
        }
        if pending.state.cancelled.get() {
            return;
        }
        let sink = DomTextSink::new(target);
        if let Err(err) = observe(&pending, sequence, sink, &trigger) {
            warn!("typed text observer failed: {}", describe_js_error(&err));
        }
    });
    binding
}

fn observe(
    binding: &TypingBinding,
    sequence: Rc<TypedSequence>,
    sink: DomTextSink,
    trigger: &Element,
) -> Result<(), JsValue> {
    let threshold = sequence.config().visibility_threshold;
    let sink = Rc::new(sink);
    // The callback holds the binding, so the pair stays alive until released.
    let owner = binding.clone();
    let on_entries = move |entries: js_sys::Array, _observer: IntersectionObserver| {
        let visible = entries.iter().any(|entry| {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            sequence.should_start(entry.intersection_ratio())
        });
        if !visible {
            return;
        }
        let owner = owner.clone();
        let sequence = Rc::clone(&sequence);
        let sink = Rc::clone(&sink);
        spawn_local(async move {
            // Runs after the callback has returned, so the closure can go.
            owner.release();
            let outcome = sequence.run(&*sink, &BrowserTimer).await;
            debug!("typed text finished: {outcome:?}");
        });
    };
    let callback: ObserverClosure = Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(_, _)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(trigger);
    *binding.state.watch.borrow_mut() = Some(Watch {
        observer,
        _callback: callback,
    });
    Ok(())
}
