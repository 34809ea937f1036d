// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rescue scenarios offered on the "Save The World" page.

use crate::format::format_number;

/// A compiled-in outcome where the impact threat was neutralized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Stable identifier, also used in the `Save_{id}` request name.
    pub id: u32,
    /// Card title.
    pub name: &'static str,
    /// One-line card description.
    pub description: &'static str,
    /// Residual impactor diameter in kilometres.
    pub diameter: &'static str,
    /// Residual impactor velocity in km/s.
    pub velocity: &'static str,
    /// Status line shown after the saved area is displayed.
    pub message: &'static str,
}

impl Scenario {
    /// Asteroid name sent with the simulation request.
    #[must_use]
    pub fn asteroid_name(&self) -> String {
        format!("Save_{}", self.id)
    }

    /// Original threat as `"{metres}m at {velocity} km/s"`.
    #[must_use]
    pub fn threat_summary(&self) -> String {
        let metres = self.diameter.trim().parse::<f64>().ok().map(|km| km * 1000.0);
        format!("{}m at {} km/s", format_number(metres, 1), self.velocity)
    }
}

/// All scenarios, in display order.
pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: 1,
        name: "Deflection Mission Success",
        description: "NASA's DART mission successfully deflected the asteroid",
        diameter: "0.001",
        velocity: "5",
        message: "Mission accomplished! The asteroid was deflected with minimal impact.",
    },
    Scenario {
        id: 2,
        name: "Nuclear Disruption",
        description: "Nuclear device fragmented the asteroid into smaller pieces",
        diameter: "0.05",
        velocity: "8",
        message: "The asteroid was broken into smaller fragments. Minor impacts expected.",
    },
    Scenario {
        id: 3,
        name: "Gravity Tractor",
        description: "Slow deflection over years using spacecraft gravity",
        diameter: "0.01",
        velocity: "6",
        message: "Successful long-term deflection. The asteroid passed safely by Earth.",
    },
    Scenario {
        id: 4,
        name: "Last-Minute Evacuation",
        description: "Unable to stop the asteroid, but evacuated the impact zone",
        diameter: "0.1",
        velocity: "12",
        message: "Impact occurred but all residents were safely evacuated beforehand.",
    },
    Scenario {
        id: 5,
        name: "Kinetic Impactor",
        description: "High-speed spacecraft collision changed asteroid trajectory",
        diameter: "0.02",
        velocity: "7",
        message: "Kinetic impact successful. Asteroid trajectory altered significantly.",
    },
];

/// Looks up a scenario by id.
#[must_use]
pub fn find(id: u32) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}
