// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hooks into the static host page.
//!
//! The host page ships its own intro sections and navigation videos; the
//! client only animates their titles and listens for clicks on them.

use crate::view::Action;

/// Selector of the container that receives the dynamic regions.
pub const MAIN_PAGE_SELECTOR: &str = ".mainPage";

/// A typed title already present in the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntroTitle {
    /// Id of the section that triggers the reveal.
    pub section_id: &'static str,
    /// Selector of the title inside the section.
    pub selector: &'static str,
    /// Lines to reveal.
    pub lines: &'static [&'static str],
    /// Delay before the trigger is observed, in milliseconds.
    pub start_delay_ms: u32,
}

/// Intro titles, in page order.
pub const INTRO_TITLES: [IntroTitle; 3] = [
    IntroTitle {
        section_id: "pageOne",
        selector: ".maintitle",
        lines: &["when the sky strikes back"],
        start_delay_ms: 300,
    },
    IntroTitle {
        section_id: "pageTwo",
        selector: ".mainTitlePage",
        lines: &["Meteor Madness"],
        start_delay_ms: 0,
    },
    IntroTitle {
        section_id: "pageTwo",
        selector: ".titlePage2",
        lines: &[
            "Welcome to Meteor Madness Infinity Explorers EG",
            "We explore the universe together!",
        ],
        start_delay_ms: 0,
    },
];

/// A host-page element whose click navigates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationHook {
    /// Selector of the clickable element.
    pub selector: &'static str,
    /// Action dispatched on click.
    pub action: Action,
}

/// Clickable host-page elements.
pub const NAVIGATION_HOOKS: [NavigationHook; 4] = [
    NavigationHook {
        selector: ".dystriodVideo",
        action: Action::Destroy,
    },
    NavigationHook {
        selector: ".dystriodEarthBtn",
        action: Action::Destroy,
    },
    NavigationHook {
        selector: ".saveVideo",
        action: Action::Save,
    },
    NavigationHook {
        selector: ".saveEarthBtn",
        action: Action::Save,
    },
];
