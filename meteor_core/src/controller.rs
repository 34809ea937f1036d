// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View controller.
//!
//! [`Controller`] owns the explicit [`ViewState`], the
//! [`SimulationApi`] and the [`Presenter`]. Every user action is routed
//! through [`dispatch`](Controller::dispatch), and every transition replaces
//! a region or slot wholesale.
//!
//! Service calls suspend the handler. While one is in flight the user may
//! navigate elsewhere; each slot therefore carries an epoch that every
//! replacement bumps, and a reply whose epoch is no longer current is
//! dropped.

use core::cell::{Cell, RefCell};

use log::{debug, info, warn};

use crate::api::SimulationApi;
use crate::backend::Presenter;
use crate::config::ClientConfig;
use crate::model::{
    CatalogAsteroid, CatalogOutcome, SimulationOutcome, SimulationRequest, SimulationResult,
};
use crate::pages;
use crate::scenario::{self, Scenario};
use crate::transport::{Transport, TransportError};
use crate::view::{Action, Field, Region, Slot};

/// Which half of the demo the user picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Simulate an impact.
    Destroy,
    /// Browse rescue scenarios.
    Save,
}

/// What the workspace region shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WorkspaceView {
    /// Not mounted.
    #[default]
    Closed,
    /// The custom asteroid form.
    CustomForm,
    /// Waiting for the catalog.
    LoadingCatalog,
    /// The catalog selection form, or the empty-catalog notice.
    Catalog(Vec<CatalogAsteroid>),
    /// Waiting for a simulation.
    Simulating,
    /// Simulation results.
    Results(SimulationResult),
    /// An error line.
    Failed(String),
}

/// Progress of the scenario region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioStage {
    /// Location form shown, nothing requested yet.
    Ready,
    /// Waiting for the saved-area simulation.
    Generating,
    /// Success card shown.
    Saved,
    /// Error line shown.
    Failed,
}

/// The open scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioView {
    /// Scenario id.
    pub id: u32,
    /// Progress.
    pub stage: ScenarioStage,
}

/// Everything the page currently shows beyond the static host content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Selected branch; `None` on the intro pages.
    pub branch: Option<Branch>,
    /// Workspace content.
    pub workspace: WorkspaceView,
    /// Scenario region, if open.
    pub scenario: Option<ScenarioView>,
}

/// A form was submitted with missing or unusable input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A custom form field is empty.
    #[error("Please fill all fields")]
    MissingFields,
    /// No catalog asteroid is selected.
    #[error("Please select an asteroid")]
    NoAsteroidSelected,
    /// A catalog coordinate is empty.
    #[error("Please enter coordinates")]
    MissingCoordinates,
    /// The selected catalog entry lacks `h` or `v_inf`.
    #[error("Invalid asteroid data")]
    InvalidAsteroidData,
}

/// Drives the dynamic regions of the page.
pub struct Controller<T, P> {
    api: SimulationApi<T>,
    presenter: P,
    config: ClientConfig,
    state: RefCell<ViewState>,
    epochs: [Cell<u64>; 2],
}

impl<T, P> core::fmt::Debug for Controller<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("epochs", &self.epochs)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, P: Presenter> Controller<T, P> {
    /// Creates a controller showing nothing beyond the host page.
    #[must_use]
    pub fn new(api: SimulationApi<T>, presenter: P, config: ClientConfig) -> Self {
        Self {
            api,
            presenter,
            config,
            state: RefCell::default(),
            epochs: [Cell::new(0), Cell::new(0)],
        }
    }

    /// A snapshot of the current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The service adapter.
    #[must_use]
    pub fn api(&self) -> &SimulationApi<T> {
        &self.api
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Handles one user action.
    ///
    /// Actions that call the service complete once the reply is rendered or
    /// found stale.
    pub async fn dispatch(&self, action: Action) {
        debug!("dispatch {action:?}");
        match action {
            Action::Destroy => self.open_branch(Branch::Destroy),
            Action::Save => self.open_branch(Branch::Save),
            Action::AddAsteroid => self.open_custom_form(),
            Action::ChooseAsteroid => self.open_catalog().await,
            Action::Generate => match self.custom_request() {
                Ok(request) => self.simulate(request).await,
                Err(err) => self.reject(err),
            },
            Action::Launch => match self.catalog_request() {
                Ok(request) => self.simulate(request).await,
                Err(err) => self.reject(err),
            },
            Action::SelectScenario(id) => self.open_scenario(id),
            Action::ViewSavedArea(id) => self.view_saved_area(id).await,
        }
    }

    // -- Navigation ----------------------------------------------------------

    fn open_branch(&self, branch: Branch) {
        for region in Region::ALL {
            self.presenter.unmount(region);
        }
        for slot in Slot::ALL {
            self.invalidate(slot);
        }
        let picker = match branch {
            Branch::Destroy => pages::destroy_picker(self.config.typing),
            Branch::Save => pages::save_picker(self.config.typing),
        };
        self.presenter.mount(Region::ModePicker, picker);
        *self.state.borrow_mut() = ViewState {
            branch: Some(branch),
            ..ViewState::default()
        };
        self.presenter.scroll_to(Region::ModePicker);
    }

    fn open_custom_form(&self) {
        self.invalidate(Slot::WorkspaceContent);
        self.presenter.mount(
            Region::Workspace,
            pages::workspace(&self.config, pages::custom_form()),
        );
        self.set_workspace(WorkspaceView::CustomForm);
        self.presenter.scroll_to(Region::Workspace);
    }

    async fn open_catalog(&self) {
        if !self.presenter.is_mounted(Region::Workspace) {
            self.presenter
                .mount(Region::Workspace, pages::workspace(&self.config, Vec::new()));
        }
        let ticket = self.invalidate(Slot::WorkspaceContent);
        self.presenter.fill(
            Slot::WorkspaceContent,
            vec![pages::loading_panel(&self.config)],
        );
        self.set_workspace(WorkspaceView::LoadingCatalog);
        self.presenter.scroll_to(Region::Workspace);

        let outcome = self.api.list_asteroids().await;
        if !self.is_current(Slot::WorkspaceContent, ticket) {
            debug!("dropping stale catalog reply");
            return;
        }
        match outcome {
            Ok(CatalogOutcome::Listed(entries)) => {
                let content = if entries.is_empty() {
                    vec![pages::notice(pages::NO_ASTEROIDS)]
                } else {
                    pages::catalog_form(&entries)
                };
                self.presenter.fill(Slot::WorkspaceContent, content);
                self.set_workspace(WorkspaceView::Catalog(entries));
            }
            Ok(CatalogOutcome::Failed(message)) => self.show_workspace_error(message),
            Err(err) => self.show_workspace_error(err.to_string()),
        }
    }

    fn open_scenario(&self, id: u32) {
        let Some(scenario) = scenario::find(id) else {
            warn!("unknown scenario {id}");
            return;
        };
        self.invalidate(Slot::ScenarioResults);
        self.presenter.mount(
            Region::Scenario,
            pages::scenario_page(scenario, self.config.typing),
        );
        self.state.borrow_mut().scenario = Some(ScenarioView {
            id,
            stage: ScenarioStage::Ready,
        });
        self.presenter.scroll_to(Region::Scenario);
    }

    // -- Service calls -------------------------------------------------------

    async fn simulate(&self, request: SimulationRequest) {
        let ticket = self.invalidate(Slot::WorkspaceContent);
        self.presenter.fill(
            Slot::WorkspaceContent,
            vec![pages::loading_panel(&self.config)],
        );
        self.set_workspace(WorkspaceView::Simulating);

        info!("Calling simulation...");
        let outcome = self.api.run_simulation(&request).await;
        if !self.is_current(Slot::WorkspaceContent, ticket) {
            debug!("dropping stale simulation reply");
            return;
        }
        match outcome {
            Ok(SimulationOutcome::Completed(result)) => {
                self.presenter
                    .fill(Slot::WorkspaceContent, vec![pages::results_panel(&result)]);
                self.set_workspace(WorkspaceView::Results(result));
            }
            Ok(SimulationOutcome::Failed(message)) => self.show_workspace_error(message),
            Err(err) => self.show_workspace_error(err.to_string()),
        }
    }

    async fn view_saved_area(&self, id: u32) {
        let Some(scenario) = scenario::find(id) else {
            warn!("unknown scenario {id}");
            return;
        };
        let request = SimulationRequest::scenario(
            scenario,
            self.presenter
                .field_value(Field::SavedLatitude)
                .unwrap_or_default(),
            self.presenter
                .field_value(Field::SavedLongitude)
                .unwrap_or_default(),
        );
        let ticket = self.invalidate(Slot::ScenarioResults);
        self.presenter
            .fill(Slot::ScenarioResults, vec![pages::generating_line()]);
        self.set_scenario_stage(id, ScenarioStage::Generating);

        let outcome = self.api.run_simulation(&request).await;
        if !self.is_current(Slot::ScenarioResults, ticket) {
            debug!("dropping stale saved-area reply");
            return;
        }
        self.show_saved_area(scenario, outcome);
    }

    fn show_saved_area(
        &self,
        scenario: &Scenario,
        outcome: Result<SimulationOutcome, TransportError>,
    ) {
        let (content, stage) = match outcome {
            Ok(SimulationOutcome::Completed(result)) => (
                pages::saved_area_card(&result, scenario, self.config.typing),
                ScenarioStage::Saved,
            ),
            Ok(SimulationOutcome::Failed(message)) => {
                (pages::error_line(&message), ScenarioStage::Failed)
            }
            Err(_) => (
                pages::notice(pages::SAVED_AREA_FAILED),
                ScenarioStage::Failed,
            ),
        };
        self.presenter.fill(Slot::ScenarioResults, vec![content]);
        self.set_scenario_stage(scenario.id, stage);
    }

    // -- Validation ----------------------------------------------------------

    fn custom_request(&self) -> Result<SimulationRequest, ValidationError> {
        let diameter = self.required(Field::Diameter);
        let velocity = self.required(Field::Velocity);
        let latitude = self.required(Field::Latitude);
        let longitude = self.required(Field::Longitude);
        match (diameter, velocity, latitude, longitude) {
            (Some(d), Some(v), Some(lat), Some(lon)) => {
                Ok(SimulationRequest::custom(d, v, lat, lon))
            }
            _ => Err(ValidationError::MissingFields),
        }
    }

    fn catalog_request(&self) -> Result<SimulationRequest, ValidationError> {
        let name = self
            .required(Field::Asteroid)
            .ok_or(ValidationError::NoAsteroidSelected)?;
        let (Some(latitude), Some(longitude)) =
            (self.required(Field::Latitude), self.required(Field::Longitude))
        else {
            return Err(ValidationError::MissingCoordinates);
        };
        let state = self.state.borrow();
        let WorkspaceView::Catalog(entries) = &state.workspace else {
            return Err(ValidationError::InvalidAsteroidData);
        };
        entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| SimulationRequest::catalog(entry, latitude, longitude))
            .ok_or(ValidationError::InvalidAsteroidData)
    }

    fn required(&self, field: Field) -> Option<String> {
        self.presenter
            .field_value(field)
            .filter(|value| !value.is_empty())
    }

    fn reject(&self, err: ValidationError) {
        debug!("rejected submission: {err}");
        self.presenter.alert(&err.to_string());
    }

    // -- State ---------------------------------------------------------------

    fn show_workspace_error(&self, message: String) {
        self.presenter
            .fill(Slot::WorkspaceContent, vec![pages::error_line(&message)]);
        self.set_workspace(WorkspaceView::Failed(message));
    }

    fn set_workspace(&self, view: WorkspaceView) {
        self.state.borrow_mut().workspace = view;
    }

    fn set_scenario_stage(&self, id: u32, stage: ScenarioStage) {
        if let Some(open) = self.state.borrow_mut().scenario.as_mut()
            && open.id == id
        {
            open.stage = stage;
        }
    }

    /// Starts a new epoch for `slot` and returns it.
    fn invalidate(&self, slot: Slot) -> u64 {
        let epoch = &self.epochs[slot.index()];
        let next = epoch.get().wrapping_add(1);
        epoch.set(next);
        next
    }

    fn is_current(&self, slot: Slot, ticket: u64) -> bool {
        self.epochs[slot.index()].get() == ticket
    }
}
