// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Turns view [`Element`] trees into live DOM nodes under the host page's
//! main container. Regions are appended as children carrying their region id;
//! slots and inputs are found again through `data-slot` and `data-field`
//! attributes.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use meteor_core::backend::Presenter;
use meteor_core::view::{Action, Behavior, Element, Field, Node, Region, Slot};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, HtmlElement, HtmlIFrameElement, HtmlInputElement, HtmlSelectElement,
    ScrollBehavior, ScrollIntoViewOptions,
};

use crate::describe_js_error;
use crate::typing::{TypingBinding, bind_typing};
use crate::video::build_video;

type Dispatcher = Rc<dyn Fn(Action)>;
type ClickClosure = Closure<dyn FnMut(Event)>;

/// A listener or observer that lives as long as the nodes it was built for.
enum Binding {
    Click { _listener: ClickClosure },
    Typing(TypingBinding),
}

impl Drop for Binding {
    fn drop(&mut self) {
        if let Self::Typing(typing) = self {
            typing.cancel();
        }
    }
}

/// The part of the page a binding belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Scope {
    Region(Region),
    Slot(Slot),
}

/// Bindings grouped by the region or slot whose nodes they serve.
///
/// Replacing or removing a region releases everything bound inside it,
/// including its slots.
#[derive(Debug)]
struct Scopes<B> {
    bindings: HashMap<Scope, Vec<B>>,
}

impl<B> Default for Scopes<B> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<B> Scopes<B> {
    /// Adds `bindings` to `scope`.
    fn keep(&mut self, scope: Scope, bindings: Vec<B>) {
        if bindings.is_empty() {
            return;
        }
        self.bindings.entry(scope).or_default().extend(bindings);
    }

    /// Removes everything bound to `slot`.
    fn release_slot(&mut self, slot: Slot) -> Vec<B> {
        self.bindings.remove(&Scope::Slot(slot)).unwrap_or_default()
    }

    /// Removes everything bound to `region` and to the slots inside it.
    fn release_region(&mut self, region: Region) -> Vec<B> {
        let mut released = self
            .bindings
            .remove(&Scope::Region(region))
            .unwrap_or_default();
        for slot in Slot::ALL {
            if slot.region() == region {
                released.extend(self.release_slot(slot));
            }
        }
        released
    }

    #[cfg(test)]
    fn len(&self, scope: Scope) -> usize {
        self.bindings.get(&scope).map_or(0, Vec::len)
    }
}

/// Applies view trees to the live DOM.
///
/// Buttons forward their [`Action`] to the dispatcher installed with
/// [`set_dispatcher`](Self::set_dispatcher); clicks before that are ignored.
///
/// Click listeners and typed-text observers are owned per region and slot and
/// released when that part of the page is replaced.
pub struct DomPresenter {
    document: Document,
    host: HtmlElement,
    dispatcher: Rc<RefCell<Option<Dispatcher>>>,
    scopes: RefCell<Scopes<Binding>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("host", &"HtmlElement")
            .field("has_dispatcher", &self.dispatcher.borrow().is_some())
            .field("scopes", &self.scopes.borrow().bindings.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter that appends regions to `host`.
    #[must_use]
    pub fn new(document: Document, host: HtmlElement) -> Self {
        Self {
            document,
            host,
            dispatcher: Rc::default(),
            scopes: RefCell::default(),
        }
    }

    /// Routes button clicks to `dispatch`.
    pub fn set_dispatcher(&self, dispatch: impl Fn(Action) + 'static) {
        *self.dispatcher.borrow_mut() = Some(Rc::new(dispatch));
    }

    /// Builds a DOM subtree for `element`, collecting its bindings.
    fn build(
        &self,
        element: &Element,
        bindings: &mut Vec<Binding>,
    ) -> Result<web_sys::Element, JsValue> {
        let node: web_sys::Element = match &element.behavior {
            Behavior::Video(spec) => build_video(&self.document, spec)?.into(),
            _ => self.document.create_element(element.tag)?,
        };
        for (name, value) in markup_attributes(element) {
            node.set_attribute(name, &value)?;
        }

        match &element.behavior {
            Behavior::Button(action) => bindings.push(self.bind_click(&node, *action)?),
            Behavior::SandboxedFrame(markup) => {
                if let Some(frame) = node.dyn_ref::<HtmlIFrameElement>() {
                    frame.set_srcdoc(markup);
                }
            }
            _ => {}
        }

        if matches!(element.behavior, Behavior::Video(_)) {
            return Ok(node);
        }
        for child in &element.children {
            match child {
                Node::Text(text) => {
                    node.append_child(&self.document.create_text_node(text))?;
                }
                Node::Element(child) => {
                    let built = self.build(child, bindings)?;
                    node.append_child(&built)?;
                    bindings.extend(bind_typed(&built, &node, child));
                }
            }
        }
        Ok(node)
    }

    fn bind_click(&self, node: &web_sys::Element, action: Action) -> Result<Binding, JsValue> {
        let dispatcher = Rc::clone(&self.dispatcher);
        let on_click: ClickClosure = Closure::wrap(Box::new(move |_event: Event| {
            let dispatch = dispatcher.borrow().clone();
            match dispatch {
                Some(dispatch) => dispatch(action),
                None => debug!("no dispatcher for {action:?}"),
            }
        }) as Box<dyn FnMut(Event)>);
        node.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        Ok(Binding::Click {
            _listener: on_click,
        })
    }

    /// Builds `content` and appends it to `parent`.
    fn append_all(&self, parent: &web_sys::Element, content: &[Element]) -> Vec<Binding> {
        let mut bindings = Vec::new();
        for element in content {
            match self.build(element, &mut bindings) {
                Ok(node) => {
                    let _ = parent.append_child(&node);
                    bindings.extend(bind_typed(&node, parent, element));
                }
                Err(err) => {
                    warn!("could not build <{}>: {}", element.tag, describe_js_error(&err));
                }
            }
        }
        bindings
    }

    fn region_element(&self, region: Region) -> Option<web_sys::Element> {
        self.document.get_element_by_id(region.dom_id())
    }

    fn select(&self, selector: &str) -> Option<web_sys::Element> {
        self.document.query_selector(selector).ok().flatten()
    }
}

impl Presenter for DomPresenter {
    fn mount(&self, region: Region, content: Element) {
        self.unmount(region);
        let mut bindings = Vec::new();
        match self.build(&content, &mut bindings) {
            Ok(node) => {
                node.set_id(region.dom_id());
                let _ = self.host.append_child(&node);
                bindings.extend(bind_typed(&node, &self.host, &content));
                self.scopes.borrow_mut().keep(Scope::Region(region), bindings);
            }
            Err(err) => warn!("could not mount {region:?}: {}", describe_js_error(&err)),
        }
    }

    fn unmount(&self, region: Region) {
        if let Some(node) = self.region_element(region) {
            node.remove();
        }
        self.scopes.borrow_mut().release_region(region);
    }

    fn is_mounted(&self, region: Region) -> bool {
        self.region_element(region).is_some()
    }

    fn fill(&self, slot: Slot, content: Vec<Element>) {
        let Some(container) = self.select(&format!("[data-slot=\"{}\"]", slot.key())) else {
            debug!("slot {slot:?} is gone");
            return;
        };
        container.set_inner_html("");
        self.scopes.borrow_mut().release_slot(slot);
        let bindings = self.append_all(&container, &content);
        self.scopes.borrow_mut().keep(Scope::Slot(slot), bindings);
    }

    fn field_value(&self, field: Field) -> Option<String> {
        let node = self.select(&format!("[data-field=\"{}\"]", field.key()))?;
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        node.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = self.document.default_view() {
            let _ = window.alert_with_message(message);
        }
    }

    fn scroll_to(&self, region: Region) {
        if let Some(node) = self.region_element(region) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            node.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

/// Starts typed text on `node` with `trigger` as the visibility trigger.
fn bind_typed(
    node: &web_sys::Element,
    trigger: &web_sys::Element,
    element: &Element,
) -> Option<Binding> {
    let Behavior::Typed(text) = &element.behavior else {
        return None;
    };
    Some(Binding::Typing(bind_typing(node.clone(), trigger.clone(), text)))
}

/// Every attribute the DOM node for `element` receives.
///
/// Besides the element's own attributes this adds `class`, and the
/// `data-field` / `data-slot` markers the presenter uses to find nodes again.
/// Video attributes are set by the video builder instead.
#[must_use]
pub fn markup_attributes(element: &Element) -> Vec<(&'static str, Cow<'_, str>)> {
    let mut attrs = Vec::with_capacity(element.attributes.len() + 2);
    if !element.classes.is_empty() && !matches!(element.behavior, Behavior::Video(_)) {
        attrs.push(("class", Cow::Owned(element.classes.join(" "))));
    }
    for (name, value) in &element.attributes {
        attrs.push((*name, Cow::Borrowed(value.as_str())));
    }
    match &element.behavior {
        Behavior::Field(field) => attrs.push(("data-field", Cow::Borrowed(field.key()))),
        Behavior::Slot(slot) => attrs.push(("data-slot", Cow::Borrowed(slot.key()))),
        _ => {}
    }
    attrs
}
