// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend-neutral element trees.
//!
//! The controller describes every page region as an [`Element`] tree and
//! hands it to a [`Presenter`](crate::backend::Presenter). Besides ordinary
//! markup an element may carry a [`Behavior`]: a click action, an input
//! binding, typed text, a video, a sandboxed frame or a named slot. Backends
//! realize behaviors with platform machinery; tests inspect them directly.

use crate::media::VideoSpec;
use crate::typing::TypingConfig;

/// Sandbox policy of the map frame: scripts only.
pub const FRAME_SANDBOX: &str = "allow-scripts";

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// A top-level region appended to the main page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Destroy or save mode picker.
    ModePicker,
    /// Custom form or catalog, plus the results container.
    Workspace,
    /// A selected rescue scenario.
    Scenario,
}

impl Region {
    /// Every region, in page order.
    pub const ALL: [Self; 3] = [Self::ModePicker, Self::Workspace, Self::Scenario];

    /// DOM id of the region root.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::ModePicker => "pageFour",
            Self::Workspace => "pageFive",
            Self::Scenario => "pageSix",
        }
    }
}

/// A container inside a region whose content is replaced independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Form, loading panel, results or error of the workspace.
    WorkspaceContent,
    /// Loading line, success card or error of the scenario page.
    ScenarioResults,
}

impl Slot {
    /// Every slot.
    pub const ALL: [Self; 2] = [Self::WorkspaceContent, Self::ScenarioResults];

    /// Region the slot lives in.
    #[must_use]
    pub const fn region(self) -> Region {
        match self {
            Self::WorkspaceContent => Region::Workspace,
            Self::ScenarioResults => Region::Scenario,
        }
    }

    /// Value of the slot's `data-slot` attribute.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WorkspaceContent => "workspace-content",
            Self::ScenarioResults => "scenario-results",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::WorkspaceContent => 0,
            Self::ScenarioResults => 1,
        }
    }
}

/// A user input the controller reads back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Custom diameter in km.
    Diameter,
    /// Custom velocity in km/s.
    Velocity,
    /// Impact latitude.
    Latitude,
    /// Impact longitude.
    Longitude,
    /// Selected catalog asteroid.
    Asteroid,
    /// Latitude of a rescue scenario's saved area.
    SavedLatitude,
    /// Longitude of a rescue scenario's saved area.
    SavedLongitude,
}

impl Field {
    /// Value of the input's `data-field` attribute.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Diameter => "diameter",
            Self::Velocity => "velocity",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Asteroid => "asteroid",
            Self::SavedLatitude => "saved-latitude",
            Self::SavedLongitude => "saved-longitude",
        }
    }
}

/// Something the user can click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the destroy branch.
    Destroy,
    /// Open the save branch.
    Save,
    /// Show the custom asteroid form.
    AddAsteroid,
    /// Load and show the asteroid catalog.
    ChooseAsteroid,
    /// Submit the custom form.
    Generate,
    /// Submit the catalog selection.
    Launch,
    /// Open a rescue scenario.
    SelectScenario(u32),
    /// Show the saved area of a rescue scenario.
    ViewSavedArea(u32),
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Typed text attached to an element.
///
/// The reveal starts when the element's parent becomes visible.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedText {
    /// Lines to reveal.
    pub lines: Vec<String>,
    /// Pacing and start delay.
    pub config: TypingConfig,
}

/// Platform behavior of an [`Element`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Behavior {
    /// Plain markup.
    #[default]
    None,
    /// Dispatches an action on click.
    Button(Action),
    /// An input or select the controller reads.
    Field(Field),
    /// Starts empty and reveals text when visible.
    Typed(TypedText),
    /// An autoplaying video; the element's tag and children are ignored.
    Video(VideoSpec),
    /// An `<iframe>` rendering the given document under [`FRAME_SANDBOX`].
    SandboxedFrame(String),
    /// A container the controller fills later.
    Slot(Slot),
}

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// A text run.
    Text(String),
}

/// One element of a view tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Tag name.
    pub tag: &'static str,
    /// CSS classes.
    pub classes: Vec<&'static str>,
    /// Attributes other than `class`.
    pub attributes: Vec<(&'static str, String)>,
    /// Child nodes in order.
    pub children: Vec<Node>,
    /// Platform behavior.
    pub behavior: Behavior,
}

impl Element {
    /// An empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// A button that dispatches `action`.
    #[must_use]
    pub fn button(label: &str, action: Action) -> Self {
        Self::new("button")
            .text(label)
            .with_behavior(Behavior::Button(action))
    }

    /// A numeric input bound to `field`.
    #[must_use]
    pub fn number_input(field: Field, placeholder: &str) -> Self {
        Self::new("input")
            .attr("type", "number")
            .attr("placeholder", placeholder)
            .with_behavior(Behavior::Field(field))
    }

    /// An element that reveals `lines` when its parent becomes visible.
    #[must_use]
    pub fn typed<I, S>(tag: &'static str, lines: I, config: TypingConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tag).with_behavior(Behavior::Typed(TypedText {
            lines: lines.into_iter().map(Into::into).collect(),
            config,
        }))
    }

    /// An autoplaying background video.
    #[must_use]
    pub fn video(spec: VideoSpec) -> Self {
        Self::new("video").with_behavior(Behavior::Video(spec))
    }

    /// A sandboxed frame rendering `document`.
    #[must_use]
    pub fn sandboxed_frame(document: impl Into<String>) -> Self {
        Self::new("iframe")
            .class("map-container")
            .with_behavior(Behavior::SandboxedFrame(document.into()))
    }

    /// A container the controller fills later.
    #[must_use]
    pub fn slot(tag: &'static str, slot: Slot) -> Self {
        Self::new(tag).with_behavior(Behavior::Slot(slot))
    }

    /// Adds a CSS class.
    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Appends a text run.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends several child elements.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Replaces the behavior.
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    // -- Queries -------------------------------------------------------------

    /// Whether the element has `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated static text of this element and its descendants.
    ///
    /// Typed text is not included; it only exists once revealed.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// This element and all descendants, breadth first.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = vec![self];
        let mut i = 0;
        while let Some(element) = out.get(i).copied() {
            for child in &element.children {
                if let Node::Element(child) = child {
                    out.push(child);
                }
            }
            i += 1;
        }
        out
    }

    /// First element (self included) matching `predicate`.
    #[must_use]
    pub fn find(&self, predicate: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.descendants().into_iter().find(|e| predicate(e))
    }

    /// First element with `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Self> {
        self.find(|e| e.has_class(class))
    }

    /// Every action reachable by clicking inside this tree.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        self.descendants()
            .into_iter()
            .filter_map(|e| match e.behavior {
                Behavior::Button(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    /// Typed text lines of every element in this tree.
    #[must_use]
    pub fn typed_lines(&self) -> Vec<&str> {
        self.descendants()
            .into_iter()
            .filter_map(|e| match &e.behavior {
                Behavior::Typed(typed) => Some(typed),
                _ => None,
            })
            .flat_map(|typed| typed.lines.iter().map(String::as_str))
            .collect()
    }
}
