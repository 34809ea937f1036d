// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transport contract for the simulation service.
//!
//! The service is reachable two ways, chosen once at startup:
//!
//! - **Network**: JSON over HTTP; replies arrive as text.
//! - **Bridge**: a host-injected native object; replies arrive as text or as
//!   already-structured values.
//!
//! Backends implement [`Transport`] for each strategy. Transports return
//! replies unmodified as [`RawResponse`]; interpreting them is the job of
//! [`SimulationApi`](crate::api::SimulationApi).

use serde_json::Value;

use crate::model::SimulationRequest;

/// Which strategy a transport uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// HTTP against the configured API base.
    Network,
    /// Calls on the host bridge object.
    Bridge,
}

impl TransportMode {
    /// Picks the bridge when the host injected one, the network otherwise.
    #[must_use]
    pub const fn detect(bridge_present: bool) -> Self {
        if bridge_present {
            Self::Bridge
        } else {
            Self::Network
        }
    }

    /// Short name for log output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Bridge => "bridge",
        }
    }
}

/// A service reply before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawResponse {
    /// A body that still needs JSON parsing.
    Text(String),
    /// A value the host already decoded.
    Structured(Value),
}

impl RawResponse {
    /// Decodes the reply into a JSON value, or `None` if the text is not
    /// JSON.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Text(text) => serde_json::from_str(&text).ok(),
            Self::Structured(value) => Some(value),
        }
    }
}

/// A call could not be completed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request failed before a body was read.
    #[error("{0}")]
    Request(String),
    /// The bridge call threw or rejected.
    #[error("{operation}: {message}")]
    Bridge {
        /// Name of the bridge method.
        operation: &'static str,
        /// Text of the thrown value.
        message: String,
    },
    /// The request could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Asynchronous access to the simulation service.
pub trait Transport {
    /// The strategy this transport implements.
    fn mode(&self) -> TransportMode;

    /// Runs one simulation.
    fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>>;

    /// Lists the asteroid catalog.
    fn list_asteroids(&self) -> impl Future<Output = Result<RawResponse, TransportError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_detection() {
        assert_eq!(TransportMode::detect(true), TransportMode::Bridge);
        assert_eq!(TransportMode::detect(false), TransportMode::Network);
        assert_eq!(TransportMode::Bridge.label(), "bridge");
    }

    #[test]
    fn raw_text_and_structured_decode_alike() {
        let text = RawResponse::Text(r#"{"mass_kg": 2}"#.into());
        let structured = RawResponse::Structured(json!({"mass_kg": 2}));
        assert_eq!(text.into_value(), structured.into_value());
        assert_eq!(RawResponse::Text("<html>".into()).into_value(), None);
    }
}
