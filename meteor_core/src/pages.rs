// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page content.
//!
//! Pure builders for every region and slot the controller shows. Class names
//! match the host page's stylesheet.

use crate::config::ClientConfig;
use crate::format::{format_default, format_number};
use crate::media::VideoSpec;
use crate::model::{CatalogAsteroid, SimulationResult};
use crate::scenario::{SCENARIOS, Scenario};
use crate::typing::TypingConfig;
use crate::view::{Action, Behavior, Element, Field, Slot, FRAME_SANDBOX};

/// Typed line of the loading panel.
pub const LOADING_TEXT: &str = "Loading asteroids...";

/// Shown when the catalog is empty.
pub const NO_ASTEROIDS: &str = "No asteroids available";

/// Shown when a result carries no map.
pub const MAP_NOT_AVAILABLE: &str = "Map not available.";

/// Shown in the scenario results slot when the service call fails.
pub const SAVED_AREA_FAILED: &str = "Error generating simulation.";

const SAVE_DESCRIPTION: &str =
    "Choose a scenario where humanity successfully prevented catastrophic impact:";
const SAVE_DESCRIPTION_DELAY_MS: u32 = 1500;
const SCENARIO_MESSAGE_DELAY_MS: u32 = 2000;
const SCENARIO_LOCATION_DELAY_MS: u32 = 3500;
const MAP_FRAME_STYLE: &str = "width: 100%; height: 400px; border-radius: 8px; border: none;";

// ---------------------------------------------------------------------------
// Mode pickers
// ---------------------------------------------------------------------------

/// Destroy branch picker: typed title and the two workspace entry points.
#[must_use]
pub fn destroy_picker(typing: TypingConfig) -> Element {
    Element::new("div")
        .class("pageFour")
        .class("container")
        .class("pageFourDystriod")
        .child(Element::typed("h1", ["Destroy Earth"], typing).class("titlePageDystriod"))
        .child(
            Element::new("div")
                .class("containerDystriod")
                .child(
                    Element::button("Add Your Asteroid", Action::AddAsteroid)
                        .class("addYourAstreriod"),
                )
                .child(
                    Element::button("Choose Your Asteroid", Action::ChooseAsteroid)
                        .class("choseYourAstreriod"),
                ),
        )
}

/// Save branch picker: typed title, delayed description and scenario cards.
#[must_use]
pub fn save_picker(typing: TypingConfig) -> Element {
    let cards = SCENARIOS.iter().map(|scenario| {
        Element::new("div")
            .class("scenarioCard")
            .child(Element::new("h3").text(scenario.name))
            .child(Element::new("p").class("scenarioDesc").text(scenario.description))
            .child(
                Element::button("Select This Scenario", Action::SelectScenario(scenario.id))
                    .class("selectScenarioBtn"),
            )
    });
    Element::new("div")
        .class("pageFour")
        .class("container")
        .class("pageFourSave")
        .child(Element::typed("h1", ["Save The World"], typing).class("titlePageSave"))
        .child(Element::new("div").class("saveDescription").child(Element::typed(
            "p",
            [SAVE_DESCRIPTION],
            typing.with_start_delay(SAVE_DESCRIPTION_DELAY_MS),
        )))
        .child(Element::new("div").class("scenariosContainer").children(cards))
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// Workspace region: the content slot pre-filled with `content`, beside the
/// looping Earth video.
#[must_use]
pub fn workspace(config: &ClientConfig, content: Vec<Element>) -> Element {
    Element::new("div").class("pageFive").class("container").child(
        Element::new("div")
            .class("containerFive")
            .child(
                Element::slot("div", Slot::WorkspaceContent)
                    .class("containerFiveInputs")
                    .children(content),
            )
            .child(
                Element::new("div")
                    .class("containerAnmations")
                    .child(Element::video(VideoSpec::new(&config.media.earth_video, "Earth"))),
            ),
    )
}

/// Custom asteroid form.
#[must_use]
pub fn custom_form() -> Vec<Element> {
    vec![
        Element::new("div")
            .class("containerDiamter")
            .child(Element::number_input(Field::Diameter, "Diameter (km)").class("diameter")),
        Element::new("div")
            .class("containerVelocity")
            .child(Element::number_input(Field::Velocity, "Velocity (km/s)").class("velocity")),
        Element::new("div")
            .class("containerLatitude")
            .child(latitude_input(Field::Latitude)),
        Element::new("div")
            .class("containerLongitude")
            .child(longitude_input(Field::Longitude)),
        Element::button("Generate", Action::Generate).class("generate"),
    ]
}

/// Looping loading video with a typed caption.
#[must_use]
pub fn loading_panel(config: &ClientConfig) -> Element {
    Element::new("div")
        .class("loadingPage")
        .child(Element::video(VideoSpec::new(
            &config.media.loading_video,
            "loadingVideo",
        )))
        .child(Element::typed("p", [LOADING_TEXT], config.typing).class("loadingText"))
}

/// Catalog selection form.
///
/// Each option carries the entry's catalog values as `data-h` and
/// `data-v_inf`.
#[must_use]
pub fn catalog_form(entries: &[CatalogAsteroid]) -> Vec<Element> {
    let options = entries.iter().map(|entry| {
        let mut option = Element::new("option").attr("value", entry.name.as_str());
        if let Some(h) = &entry.absolute_magnitude {
            option = option.attr("data-h", h.as_str());
        }
        if let Some(v_inf) = &entry.hyperbolic_excess_velocity {
            option = option.attr("data-v_inf", v_inf.as_str());
        }
        option.text(entry.name.as_str())
    });
    vec![
        Element::new("select")
            .class("asteroidSelect")
            .with_behavior(Behavior::Field(Field::Asteroid))
            .child(
                Element::new("option")
                    .attr("value", "")
                    .text("Select an Asteroid"),
            )
            .children(options),
        latitude_input(Field::Latitude),
        longitude_input(Field::Longitude),
        Element::button("Launch Simulation", Action::Launch).class("launchButton"),
    ]
}

/// Simulation results.
///
/// Ocean impacts show the tsunami height; land impacts show crater depth and
/// earthquake magnitude instead.
#[must_use]
pub fn results_panel(result: &SimulationResult) -> Element {
    let mut group = Element::new("div")
        .class("result-group")
        .child(Element::new("h2").class("text-center").text("Simulation Results"))
        .child(result_line(format!("Mass: {} kg", format_default(&result.mass_kg))))
        .child(result_line(format!(
            "Kinetic energy: {} Joules",
            format_default(&result.energy_joules)
        )))
        .child(result_line(format!(
            "Megatons TNT: {}",
            format_default(&result.megatons_tnt)
        )))
        .child(result_line(format!(
            "Crater Diameter: {} km",
            format_default(&result.crater_diameter_km)
        )));

    if result.is_ocean_impact {
        group = group.child(result_line(format!(
            "Tsunami height: {} m",
            format_default(&result.tsunami_height_m)
        )));
    } else {
        group = group
            .child(result_line(format!(
                "Crater Depth: {} km",
                format_default(&result.crater_depth_km)
            )))
            .child(result_line(format!(
                "Earthquake Magnitude: {} Richter",
                format_default(&result.earthquake_magnitude)
            )));
    }

    group = group.child(Element::new("h3").class("mb-2").text("Impact location"));
    group = match result.map_markup() {
        Some(markup) => group.child(map_frame(markup)),
        None => group.child(Element::new("p").text(MAP_NOT_AVAILABLE)),
    };

    Element::new("div").class("results").class("mt-4").child(group)
}

/// `Error: {message}` line.
#[must_use]
pub fn error_line(message: &str) -> Element {
    notice(&format!("Error: {message}"))
}

/// A line in the danger style.
#[must_use]
pub fn notice(text: &str) -> Element {
    Element::new("p").class("text-danger").text(text)
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Scenario region: typed name and message, the saved-area location form and
/// the results slot.
#[must_use]
pub fn scenario_page(scenario: &Scenario, typing: TypingConfig) -> Element {
    Element::new("div")
        .class("pageSix")
        .class("container")
        .child(Element::typed("h2", [scenario.name], typing).class("scenarioTitle"))
        .child(Element::new("div").class("scenarioMessage").child(
            Element::typed(
                "p",
                [scenario.message],
                typing.with_start_delay(SCENARIO_MESSAGE_DELAY_MS),
            )
            .class("messageText"),
        ))
        .child(
            Element::new("div")
                .class("locationContainer")
                .child(Element::typed(
                    "h3",
                    ["Verify Impact Zone (Former Threat Location)"],
                    typing.with_start_delay(SCENARIO_LOCATION_DELAY_MS),
                ))
                .child(latitude_input(Field::SavedLatitude).attr("value", "0"))
                .child(longitude_input(Field::SavedLongitude).attr("value", "0"))
                .child(
                    Element::button("View Saved Area on Map", Action::ViewSavedArea(scenario.id))
                        .class("generate"),
                ),
        )
        .child(Element::slot("div", Slot::ScenarioResults).class("scenarioResults"))
}

/// Placeholder while the saved area is computed.
#[must_use]
pub fn generating_line() -> Element {
    Element::new("p")
        .class("text-info")
        .class("text-center")
        .text("Generating map...")
}

/// Success card for a rescue scenario.
#[must_use]
pub fn saved_area_card(
    result: &SimulationResult,
    scenario: &Scenario,
    typing: TypingConfig,
) -> Element {
    let impact = Element::new("div")
        .class("impactData")
        .child(labelled(
            "Original Threat:",
            &format!("Asteroid {}", scenario.threat_summary()),
        ))
        .child(labelled(
            "Actual Impact Energy:",
            &format!("{} Megatons TNT (Minimal)", format_number(&result.megatons_tnt, 6)),
        ))
        .child(labelled(
            "Crater Diameter:",
            &format!("{} km (Negligible)", format_number(&result.crater_diameter_km, 3)),
        ))
        .child(labelled("Status:", scenario.message).class("success-text"))
        .child(labelled("Casualties:", "Zero - Mission Success!").class("success-text"));

    let mut card = Element::new("div")
        .class("successCard")
        .child(
            Element::typed("h2", ["✓ Threat Neutralized"], typing)
                .class("text-center")
                .class("successTitle"),
        )
        .child(impact);
    if let Some(markup) = result.map_markup() {
        card = card
            .child(Element::new("h3").class("mb-2").text("Saved Location"))
            .child(map_frame(markup));
    }
    card
}

// ---------------------------------------------------------------------------
// Pieces
// ---------------------------------------------------------------------------

fn latitude_input(field: Field) -> Element {
    Element::number_input(field, "Latitude")
        .class("latitude")
        .attr("min", "-90")
        .attr("max", "90")
}

fn longitude_input(field: Field) -> Element {
    Element::number_input(field, "Longitude")
        .class("longitude")
        .attr("min", "-180")
        .attr("max", "180")
}

fn result_line(text: String) -> Element {
    Element::new("p").class("mb-2").text(text)
}

fn labelled(label: &str, value: &str) -> Element {
    Element::new("p")
        .class("mb-2")
        .child(Element::new("strong").text(label))
        .text(format!(" {value}"))
}

fn map_frame(markup: &str) -> Element {
    Element::sandboxed_frame(markup)
        .attr("sandbox", FRAME_SANDBOX)
        .attr("style", MAP_FRAME_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn land_result() -> SimulationResult {
        serde_json::from_value(json!({
            "mass_kg": 1234.5678,
            "energy_joules": "oops",
            "megatons_tnt": 0.0000123,
            "crater_diameter_km": 1.5,
            "crater_depth_km": 0.3,
            "earthquake_magnitude": 5.25,
            "is_ocean_impact": false,
            "map_html": "<html>map</html>",
        }))
        .unwrap()
    }

    #[test]
    fn land_results_show_depth_and_magnitude() {
        let panel = results_panel(&land_result());
        let text = panel.text_content();
        assert!(text.contains("Mass: 1234.57 kg"), "{text}");
        assert!(text.contains("Kinetic energy: N/A Joules"), "{text}");
        assert!(text.contains("Crater Depth: 0.30 km"), "{text}");
        assert!(text.contains("Earthquake Magnitude: 5.25 Richter"), "{text}");
        assert!(!text.contains("Tsunami"), "{text}");

        let frame = panel.find_by_class("map-container").unwrap();
        assert_eq!(frame.attribute("sandbox"), Some("allow-scripts"));
        assert_eq!(
            frame.behavior,
            Behavior::SandboxedFrame("<html>map</html>".into())
        );
    }

    #[test]
    fn ocean_results_show_tsunami_only() {
        let result = SimulationResult {
            is_ocean_impact: true,
            tsunami_height_m: json!(12),
            ..SimulationResult::default()
        };
        let text = results_panel(&result).text_content();
        assert!(text.contains("Tsunami height: 12.00 m"), "{text}");
        assert!(!text.contains("Crater Depth"), "{text}");
        assert!(!text.contains("Earthquake Magnitude"), "{text}");
        assert!(text.contains(MAP_NOT_AVAILABLE), "{text}");
    }

    #[test]
    fn catalog_options_carry_data_attributes() {
        let entries = [CatalogAsteroid {
            name: "Bennu".into(),
            absolute_magnitude: Some("20.19".into()),
            hyperbolic_excess_velocity: Some("6.4".into()),
        }];
        let form = catalog_form(&entries);
        let select = &form[0];
        assert_eq!(select.behavior, Behavior::Field(Field::Asteroid));
        let option = select.find(|e| e.attribute("value") == Some("Bennu")).unwrap();
        assert_eq!(option.attribute("data-h"), Some("20.19"));
        assert_eq!(option.attribute("data-v_inf"), Some("6.4"));
        assert_eq!(select.text_content(), "Select an AsteroidBennu");
    }

    #[test]
    fn saved_area_card_precision() {
        let card = saved_area_card(&land_result(), &SCENARIOS[0], TypingConfig::new());
        let text = card.text_content();
        assert!(text.contains("Original Threat: Asteroid 1.0m at 5 km/s"), "{text}");
        assert!(text.contains("0.000012 Megatons TNT (Minimal)"), "{text}");
        assert!(text.contains("1.500 km (Negligible)"), "{text}");
        assert!(text.contains("Casualties: Zero - Mission Success!"), "{text}");
        assert!(text.contains("Saved Location"), "{text}");
        assert_eq!(card.typed_lines(), ["✓ Threat Neutralized"]);
    }

    #[test]
    fn scenario_page_delays_and_defaults() {
        let page = scenario_page(&SCENARIOS[1], TypingConfig::new());
        let delays: Vec<u32> = page
            .descendants()
            .into_iter()
            .filter_map(|e| match &e.behavior {
                Behavior::Typed(typed) => Some(typed.config.start_delay_ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, [0, 2000, 3500]);
        let lat = page
            .find(|e| e.behavior == Behavior::Field(Field::SavedLatitude))
            .unwrap();
        assert_eq!(lat.attribute("value"), Some("0"));
        assert_eq!(page.actions(), [Action::ViewSavedArea(2)]);
    }

    #[test]
    fn pickers_offer_their_actions() {
        let destroy = destroy_picker(TypingConfig::new());
        assert_eq!(destroy.actions(), [Action::AddAsteroid, Action::ChooseAsteroid]);
        assert_eq!(destroy.typed_lines(), ["Destroy Earth"]);

        let save = save_picker(TypingConfig::new());
        assert_eq!(save.actions().len(), SCENARIOS.len());
        assert_eq!(save.typed_lines(), ["Save The World", SAVE_DESCRIPTION]);
    }
}
