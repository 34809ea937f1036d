// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulation service adapter.
//!
//! [`SimulationApi`] wraps a [`Transport`] and turns its raw replies into
//! [`SimulationOutcome`] and [`CatalogOutcome`] values. Call sites never see
//! text or untyped JSON.

use log::{debug, error};
use serde_json::Value;

use crate::model::{
    CatalogAsteroid, CatalogOutcome, SimulationOutcome, SimulationRequest, SimulationResult,
    error_message,
};
use crate::transport::{RawResponse, Transport, TransportError, TransportMode};

/// Failure text for a simulation reply that could not be understood.
pub const INVALID_SIMULATION_RESPONSE: &str = "Invalid response from simulation";

/// Failure text for a catalog reply that could not be understood.
pub const INVALID_CATALOG_RESPONSE: &str = "Invalid response from asteroid catalog";

/// Typed access to the simulation service over some [`Transport`].
#[derive(Debug)]
pub struct SimulationApi<T> {
    transport: T,
}

impl<T: Transport> SimulationApi<T> {
    /// Wraps `transport`.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The strategy chosen at startup.
    #[must_use]
    pub fn mode(&self) -> TransportMode {
        self.transport.mode()
    }

    /// Runs one simulation.
    pub async fn run_simulation(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationOutcome, TransportError> {
        debug!(
            "run_simulation via {} for {:?}",
            self.mode().label(),
            request.asteroid_name
        );
        let raw = self.transport.run_simulation(request).await.inspect_err(|err| {
            error!("Simulation error: {err}");
        })?;
        Ok(normalize_simulation(raw))
    }

    /// Lists the asteroid catalog.
    pub async fn list_asteroids(&self) -> Result<CatalogOutcome, TransportError> {
        debug!("list_asteroids via {}", self.mode().label());
        let raw = self.transport.list_asteroids().await.inspect_err(|err| {
            error!("Error loading asteroids: {err}");
        })?;
        Ok(normalize_catalog(raw))
    }
}

/// Interprets a simulation reply.
#[must_use]
pub fn normalize_simulation(raw: RawResponse) -> SimulationOutcome {
    let Some(value) = raw.into_value() else {
        return SimulationOutcome::Failed(INVALID_SIMULATION_RESPONSE.to_owned());
    };
    if let Some(message) = error_message(&value) {
        return SimulationOutcome::Failed(message);
    }
    match serde_json::from_value::<SimulationResult>(value) {
        Ok(result) => SimulationOutcome::Completed(result),
        Err(_) => SimulationOutcome::Failed(INVALID_SIMULATION_RESPONSE.to_owned()),
    }
}

/// Interprets a catalog reply.
#[must_use]
pub fn normalize_catalog(raw: RawResponse) -> CatalogOutcome {
    let Some(value) = raw.into_value() else {
        return CatalogOutcome::Failed(INVALID_CATALOG_RESPONSE.to_owned());
    };
    if let Some(message) = error_message(&value) {
        return CatalogOutcome::Failed(message);
    }
    if !matches!(value, Value::Array(_)) {
        return CatalogOutcome::Failed(INVALID_CATALOG_RESPONSE.to_owned());
    }
    match serde_json::from_value::<Vec<CatalogAsteroid>>(value) {
        Ok(entries) => CatalogOutcome::Listed(entries),
        Err(_) => CatalogOutcome::Failed(INVALID_CATALOG_RESPONSE.to_owned()),
    }
}
