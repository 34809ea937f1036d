// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client configuration.

use log::LevelFilter;

use crate::typing::TypingConfig;

/// Paths of the simulation service endpoints, relative to the API base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// `POST` target for simulations.
    pub run_simulation: String,
    /// `GET` target for the asteroid catalog.
    pub asteroid_list: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            run_simulation: "/api/run_simulation".to_owned(),
            asteroid_list: "/api/get_asteroid_list".to_owned(),
        }
    }
}

/// Video assets used by the dynamic pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaAssets {
    /// Looping clip shown while a simulation runs.
    pub loading_video: String,
    /// Looping clip shown beside the input forms.
    pub earth_video: String,
}

impl Default for MediaAssets {
    fn default() -> Self {
        Self {
            loading_video: "./assit/videos/3657852753-preview.mp4".to_owned(),
            earth_video: "./assit/videos/Earth destroyed.mp4".to_owned(),
        }
    }
}

/// Everything the client needs to know before it starts.
///
/// Use [`ClientConfig::web`] for the browser build; [`Default`] is quieter and
/// suits tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Prefix for the endpoint paths. Empty means same origin.
    pub api_base: String,
    /// Endpoint paths.
    pub endpoints: Endpoints,
    /// Pacing of every typed text.
    pub typing: TypingConfig,
    /// Video sources.
    pub media: MediaAssets,
    /// Maximum level forwarded to the console.
    pub log_level: LevelFilter,
}

impl ClientConfig {
    /// Preset for the browser build.
    #[must_use]
    pub fn web() -> Self {
        Self {
            log_level: LevelFilter::Info,
            ..Self::default()
        }
    }

    /// Returns a copy that targets `api_base`.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Full URL of the simulation endpoint.
    #[must_use]
    pub fn run_simulation_url(&self) -> String {
        join_url(&self.api_base, &self.endpoints.run_simulation)
    }

    /// Full URL of the catalog endpoint.
    #[must_use]
    pub fn asteroid_list_url(&self) -> String {
        join_url(&self.api_base, &self.endpoints.asteroid_list)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            endpoints: Endpoints::default(),
            typing: TypingConfig::default(),
            media: MediaAssets::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        return path.to_owned();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_by_default() {
        let config = ClientConfig::web();
        assert_eq!(config.run_simulation_url(), "/api/run_simulation");
        assert_eq!(config.asteroid_list_url(), "/api/get_asteroid_list");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn api_base_joins_cleanly() {
        let config = ClientConfig::default().with_api_base("http://127.0.0.1:5000/");
        assert_eq!(
            config.run_simulation_url(),
            "http://127.0.0.1:5000/api/run_simulation"
        );
    }
}
