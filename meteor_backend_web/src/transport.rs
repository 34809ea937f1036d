// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fetch and bridge transports.
//!
//! - [`FetchTransport`] talks JSON over HTTP. Bodies are returned as text
//!   whatever the status code; the service reports failures in the body.
//! - [`BridgeTransport`] calls methods on `window.pywebview.api`, the object a
//!   desktop host injects. Results are returned as the host produced them.
//!
//! [`WebTransport::select`] picks one at startup.

use js_sys::{Array, Function, Object, Promise, Reflect};
use meteor_core::config::ClientConfig;
use meteor_core::model::SimulationRequest;
use meteor_core::transport::{RawResponse, Transport, TransportError, TransportMode};
use serde_json::Value;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::describe_js_error;

const BRIDGE_GLOBAL: &str = "pywebview";
const BRIDGE_API: &str = "api";
const RUN_SIMULATION: &str = "run_simulation";
const GET_ASTEROID_LIST: &str = "get_asteroid_list";

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// JSON over HTTP against the configured API base.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    run_simulation_url: String,
    asteroid_list_url: String,
}

impl FetchTransport {
    /// Uses the endpoint URLs of `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            run_simulation_url: config.run_simulation_url(),
            asteroid_list_url: config.asteroid_list_url(),
        }
    }
}

impl Transport for FetchTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Network
    }

    async fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<RawResponse, TransportError> {
        let body = request
            .to_json()
            .map_err(|err| TransportError::Encode(err.to_string()))?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));
        let req = Request::new_with_str_and_init(&self.run_simulation_url, &init)
            .map_err(request_error)?;
        req.headers()
            .set("Content-Type", "application/json")
            .map_err(request_error)?;
        fetch_text(&req).await.map(RawResponse::Text)
    }

    async fn list_asteroids(&self) -> Result<RawResponse, TransportError> {
        let req = Request::new_with_str(&self.asteroid_list_url).map_err(request_error)?;
        fetch_text(&req).await.map(RawResponse::Text)
    }
}

async fn fetch_text(request: &Request) -> Result<String, TransportError> {
    let window =
        web_sys::window().ok_or_else(|| TransportError::Request("no window".to_owned()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(request_error)?
        .dyn_into()
        .map_err(request_error)?;
    let text = JsFuture::from(response.text().map_err(request_error)?)
        .await
        .map_err(request_error)?;
    text.as_string()
        .ok_or_else(|| TransportError::Request("response body is not text".to_owned()))
}

fn request_error(err: JsValue) -> TransportError {
    TransportError::Request(describe_js_error(&err))
}

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

/// Calls on the host-injected `window.pywebview.api` object.
#[derive(Clone, Debug)]
pub struct BridgeTransport {
    api: Object,
}

impl BridgeTransport {
    /// Finds the bridge object, if the host injected one.
    #[must_use]
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let host = Reflect::get(&window, &JsValue::from_str(BRIDGE_GLOBAL)).ok()?;
        if host.is_undefined() || host.is_null() {
            return None;
        }
        let api = Reflect::get(&host, &JsValue::from_str(BRIDGE_API)).ok()?;
        api.dyn_into::<Object>().ok().map(|api| Self { api })
    }

    async fn call(
        &self,
        operation: &'static str,
        args: &Array,
    ) -> Result<RawResponse, TransportError> {
        let bridge_error = |err: JsValue| TransportError::Bridge {
            operation,
            message: describe_js_error(&err),
        };
        let function: Function = Reflect::get(&self.api, &JsValue::from_str(operation))
            .map_err(bridge_error)?
            .dyn_into()
            .map_err(|_| TransportError::Bridge {
                operation,
                message: "not a function".to_owned(),
            })?;
        let result = function.apply(&self.api, args).map_err(bridge_error)?;
        let value = match result.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(bridge_error)?,
            Err(value) => value,
        };
        into_raw(operation, value)
    }
}

impl Transport for BridgeTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Bridge
    }

    async fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<RawResponse, TransportError> {
        let optional =
            |value: Option<&str>, absent: JsValue| value.map_or(absent, JsValue::from_str);
        let args = Array::new();
        args.push(&JsValue::from_str(&request.asteroid_name));
        args.push(&optional(request.diameter.as_deref(), JsValue::NULL));
        args.push(&JsValue::from_str(&request.velocity));
        args.push(&JsValue::from_str(&request.latitude));
        args.push(&JsValue::from_str(&request.longitude));
        args.push(&optional(request.absolute_magnitude.as_deref(), JsValue::UNDEFINED));
        self.call(RUN_SIMULATION, &args).await
    }

    async fn list_asteroids(&self) -> Result<RawResponse, TransportError> {
        self.call(GET_ASTEROID_LIST, &Array::new()).await
    }
}

/// Strings stay text; anything else is decoded through `JSON.stringify`.
fn into_raw(operation: &'static str, value: JsValue) -> Result<RawResponse, TransportError> {
    if let Some(text) = value.as_string() {
        return Ok(RawResponse::Text(text));
    }
    if value.is_undefined() || value.is_null() {
        return Ok(RawResponse::Structured(Value::Null));
    }
    let json = js_sys::JSON::stringify(&value).map_err(|err| TransportError::Bridge {
        operation,
        message: describe_js_error(&err),
    })?;
    serde_json::from_str(&String::from(json))
        .map(RawResponse::Structured)
        .map_err(|err| TransportError::Bridge {
            operation,
            message: err.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The transport chosen at startup.
#[derive(Clone, Debug)]
pub enum WebTransport {
    /// HTTP.
    Network(FetchTransport),
    /// Host bridge.
    Bridge(BridgeTransport),
}

impl WebTransport {
    /// Uses the host bridge when present, HTTP otherwise.
    #[must_use]
    pub fn select(config: &ClientConfig) -> Self {
        match BridgeTransport::detect() {
            Some(bridge) => Self::Bridge(bridge),
            None => Self::Network(FetchTransport::new(config)),
        }
    }
}

impl Transport for WebTransport {
    fn mode(&self) -> TransportMode {
        match self {
            Self::Network(t) => t.mode(),
            Self::Bridge(t) => t.mode(),
        }
    }

    async fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<RawResponse, TransportError> {
        match self {
            Self::Network(t) => t.run_simulation(request).await,
            Self::Bridge(t) => t.run_simulation(request).await,
        }
    }

    async fn list_asteroids(&self) -> Result<RawResponse, TransportError> {
        match self {
            Self::Network(t) => t.list_asteroids().await,
            Self::Bridge(t) => t.list_asteroids().await,
        }
    }
}
