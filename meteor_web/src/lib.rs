// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser entry point of the Meteor asteroid-impact demo.
//!
//! Attaches to a host page that provides a `.mainPage` container, the intro
//! sections and the navigation videos, then drives the dynamic regions.
//!
//! Build with: `wasm-pack build --target web meteor_web`
//! Then load the generated module from the host page.

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use std::rc::Rc;

use log::{error, info, warn};
use meteor_backend_web::{
    DomPresenter, WebTransport, bind_typing, describe_js_error, prime_existing_videos,
};
use meteor_core::api::SimulationApi;
use meteor_core::config::ClientConfig;
use meteor_core::controller::Controller;
use meteor_core::intro::{INTRO_TITLES, MAIN_PAGE_SELECTOR, NAVIGATION_HOOKS};
use meteor_core::transport::Transport as _;
use meteor_core::view::{Action, TypedText};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlElement};

type App = Controller<WebTransport, DomPresenter>;

/// Entry point for the demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = ClientConfig::web();
    if let Some(level) = config.log_level.to_level() {
        // Fails only if a logger is already installed.
        let _ = console_log::init_with_level(level);
    }

    let document = web_sys::window().expect("window").document().expect("document");

    let transport = WebTransport::select(&config);
    info!("DOM loaded, mode: {}", transport.mode().label());

    let Some(main_page) = document.query_selector(MAIN_PAGE_SELECTOR)? else {
        error!("mainPage not found!");
        return Ok(());
    };
    let host: HtmlElement = main_page.unchecked_into();

    prime_existing_videos(&document)?;

    let presenter = DomPresenter::new(document.clone(), host);
    let app: Rc<App> = Rc::new(Controller::new(SimulationApi::new(transport), presenter, config));
    let weak = Rc::downgrade(&app);
    app.presenter().set_dispatcher(move |action| {
        if let Some(app) = weak.upgrade() {
            spawn_local(async move { app.dispatch(action).await });
        }
    });

    bind_intro_titles(&document, app.config());
    bind_navigation(&document, &app)?;
    // Keep the controller alive for the lifetime of the page.
    core::mem::forget(app);
    Ok(())
}

fn bind_intro_titles(document: &Document, config: &ClientConfig) {
    for title in &INTRO_TITLES {
        let Some(section) = document.get_element_by_id(title.section_id) else {
            continue;
        };
        let Ok(Some(target)) = section.query_selector(title.selector) else {
            continue;
        };
        let text = TypedText {
            lines: title.lines.iter().map(|line| (*line).to_owned()).collect(),
            config: config.typing.with_start_delay(title.start_delay_ms),
        };
        // Intro titles stay for the whole page; the binding keeps itself alive.
        bind_typing(target, section, &text);
    }
}

fn bind_navigation(document: &Document, app: &Rc<App>) -> Result<(), JsValue> {
    for hook in &NAVIGATION_HOOKS {
        let Some(node) = document.query_selector(hook.selector)? else {
            warn!("navigation target {} not found", hook.selector);
            continue;
        };
        let app = Rc::clone(app);
        let action: Action = hook.action;
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            let app = Rc::clone(&app);
            spawn_local(async move { app.dispatch(action).await });
        }) as Box<dyn FnMut(Event)>);
        node.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .inspect_err(|err| {
                warn!("could not bind {}: {}", hook.selector, describe_js_error(err));
            })?;
        on_click.forget();
    }
    Ok(())
}
