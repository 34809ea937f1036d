// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request and response shapes of the simulation service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Parameters of one simulation call.
///
/// Values are kept as the strings the user typed; the service parses them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationRequest {
    /// Catalog name, a `Save_{id}` scenario tag, or empty for custom input.
    pub asteroid_name: String,
    /// Diameter in kilometres, absent for catalog asteroids.
    pub diameter: Option<String>,
    /// Velocity in km/s.
    pub velocity: String,
    /// Impact latitude in degrees.
    pub latitude: String,
    /// Impact longitude in degrees.
    pub longitude: String,
    /// Absolute magnitude `H`, present for catalog asteroids.
    pub absolute_magnitude: Option<String>,
}

impl SimulationRequest {
    /// A request built from the custom asteroid form.
    #[must_use]
    pub fn custom(diameter: String, velocity: String, latitude: String, longitude: String) -> Self {
        Self {
            asteroid_name: String::new(),
            diameter: Some(diameter),
            velocity,
            latitude,
            longitude,
            absolute_magnitude: None,
        }
    }

    /// A request for a catalog asteroid.
    ///
    /// The catalog's hyperbolic excess velocity doubles as the impact
    /// velocity. Returns `None` when the entry lacks either catalog value.
    #[must_use]
    pub fn catalog(
        asteroid: &CatalogAsteroid,
        latitude: String,
        longitude: String,
    ) -> Option<Self> {
        let absolute_magnitude = asteroid.absolute_magnitude.clone()?;
        let velocity = asteroid.hyperbolic_excess_velocity.clone()?;
        Some(Self {
            asteroid_name: asteroid.name.clone(),
            diameter: None,
            velocity,
            latitude,
            longitude,
            absolute_magnitude: Some(absolute_magnitude),
        })
    }

    /// A request reproducing a rescue scenario at the given location.
    #[must_use]
    pub fn scenario(scenario: &Scenario, latitude: String, longitude: String) -> Self {
        Self {
            asteroid_name: scenario.asteroid_name(),
            diameter: Some(scenario.diameter.to_owned()),
            velocity: scenario.velocity.to_owned(),
            latitude,
            longitude,
            absolute_magnitude: None,
        }
    }

    /// The JSON body sent in network mode.
    #[must_use]
    pub fn to_wire(&self) -> WireRequest<'_> {
        WireRequest {
            asteroid_name: &self.asteroid_name,
            diameter: self.diameter.as_deref(),
            velocity: &self.velocity,
            lat: &self.latitude,
            long: &self.longitude,
            h_value: self.absolute_magnitude.as_deref(),
            v_inf_value: &self.velocity,
        }
    }

    /// Serializes [`to_wire`](Self::to_wire) as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_wire())
    }
}

/// Network-mode request body.
///
/// `diameter` serializes as `null` when absent, `h_value` is omitted when
/// absent, and `v_inf_value` repeats the velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WireRequest<'a> {
    /// See [`SimulationRequest::asteroid_name`].
    pub asteroid_name: &'a str,
    /// See [`SimulationRequest::diameter`].
    pub diameter: Option<&'a str>,
    /// See [`SimulationRequest::velocity`].
    pub velocity: &'a str,
    /// See [`SimulationRequest::latitude`].
    pub lat: &'a str,
    /// See [`SimulationRequest::longitude`].
    pub long: &'a str,
    /// See [`SimulationRequest::absolute_magnitude`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_value: Option<&'a str>,
    /// Same as `velocity`.
    pub v_inf_value: &'a str,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Physical results of a simulated impact.
///
/// Numeric fields are left as raw JSON so that missing or malformed values
/// surface as `N/A` when formatted rather than failing the whole response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationResult {
    /// Impactor mass in kilograms.
    pub mass_kg: Value,
    /// Kinetic energy in joules.
    pub energy_joules: Value,
    /// Kinetic energy in megatons of TNT.
    pub megatons_tnt: Value,
    /// Crater diameter in kilometres.
    pub crater_diameter_km: Value,
    /// Crater depth in kilometres (land impacts).
    pub crater_depth_km: Value,
    /// Richter magnitude (land impacts).
    pub earthquake_magnitude: Value,
    /// Whether the impact point is in the ocean.
    #[serde(deserialize_with = "truthy")]
    pub is_ocean_impact: bool,
    /// Tsunami height in metres (ocean impacts).
    pub tsunami_height_m: Value,
    /// Self-contained HTML document rendering the impact map.
    pub map_html: Option<String>,
}

impl SimulationResult {
    /// The map document, if the service produced a non-empty one.
    #[must_use]
    pub fn map_markup(&self) -> Option<&str> {
        self.map_html.as_deref().filter(|html| !html.is_empty())
    }
}

/// Normalized result of a simulation call.
#[derive(Clone, Debug, PartialEq)]
pub enum SimulationOutcome {
    /// The service computed a result.
    Completed(SimulationResult),
    /// The service reported an error, or its reply could not be understood.
    Failed(String),
}

/// One entry of the asteroid catalog.
///
/// The service may send `h` and `v_inf` as numbers or strings; both are kept
/// as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogAsteroid {
    /// Display name and request key.
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    /// Absolute magnitude `H`.
    #[serde(rename = "h", default, deserialize_with = "lenient_text")]
    pub absolute_magnitude: Option<String>,
    /// Hyperbolic excess velocity `v_inf` in km/s.
    #[serde(rename = "v_inf", default, deserialize_with = "lenient_text")]
    pub hyperbolic_excess_velocity: Option<String>,
}

/// Normalized result of a catalog listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogOutcome {
    /// The catalog entries, possibly empty.
    Listed(Vec<CatalogAsteroid>),
    /// The service reported an error, or its reply could not be understood.
    Failed(String),
}

/// Reads the `error` member of a service reply, if it carries one.
pub(crate) fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

/// String form of a scalar JSON value; `None` for null, empty and compound
/// values.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn custom_request_wire_form() {
        let request =
            SimulationRequest::custom("1.2".into(), "20".into(), "10".into(), "20".into());
        let body: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "asteroid_name": "",
                "diameter": "1.2",
                "velocity": "20",
                "lat": "10",
                "long": "20",
                "v_inf_value": "20",
            })
        );
    }

    #[test]
    fn catalog_request_sends_null_diameter_and_h_value() {
        let asteroid = CatalogAsteroid {
            name: "Apophis".into(),
            absolute_magnitude: Some("19.7".into()),
            hyperbolic_excess_velocity: Some("5.87".into()),
        };
        let request = SimulationRequest::catalog(&asteroid, "1".into(), "2".into()).unwrap();
        let body: Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(body["diameter"], Value::Null);
        assert_eq!(body["h_value"], "19.7");
        assert_eq!(body["velocity"], "5.87");
        assert_eq!(body["v_inf_value"], "5.87");
    }

    #[test]
    fn catalog_request_requires_both_values() {
        let asteroid = CatalogAsteroid {
            name: "Ryugu".into(),
            absolute_magnitude: Some("19.3".into()),
            hyperbolic_excess_velocity: None,
        };
        assert_eq!(SimulationRequest::catalog(&asteroid, "0".into(), "0".into()), None);
    }

    #[test]
    fn result_tolerates_missing_and_odd_fields() {
        let result: SimulationResult = serde_json::from_value(json!({
            "mass_kg": 1.5e12,
            "megatons_tnt": "12.5",
            "is_ocean_impact": 1,
            "map_html": "",
        }))
        .unwrap();
        assert_eq!(result.energy_joules, Value::Null);
        assert!(result.is_ocean_impact, "numeric truthiness");
        assert_eq!(result.map_markup(), None);
    }

    #[test]
    fn catalog_entries_accept_numbers_or_strings() {
        let entries: Vec<CatalogAsteroid> = serde_json::from_value(json!([
            { "name": "Bennu", "h": 20.19, "v_inf": "6.4" },
            { "name": "Ryugu", "h": null },
        ]))
        .unwrap();
        assert_eq!(entries[0].absolute_magnitude.as_deref(), Some("20.19"));
        assert_eq!(entries[0].hyperbolic_excess_velocity.as_deref(), Some("6.4"));
        assert_eq!(entries[1].absolute_magnitude, None);
        assert_eq!(entries[1].hyperbolic_excess_velocity, None);
    }

    #[test]
    fn error_member_detection() {
        assert_eq!(error_message(&json!({"error": "boom"})).as_deref(), Some("boom"));
        assert_eq!(error_message(&json!({"error": ""})), None);
        assert_eq!(error_message(&json!({"error": null})), None);
        assert_eq!(error_message(&json!({"mass_kg": 1})), None);
        assert_eq!(error_message(&json!([1])), None);
    }
}
