//! The automation controller: selection, form lifecycle and runs.
//!
//! ```text
//! Idle --select(id)--> Ready --run--> Running --response--> Ready
//!   ^                    |
//!   +----select(none)----+
//! ```
//!
//! A run that fails validation never leaves `Ready`. Whatever the response,
//! `Running` always returns to `Ready` with the run action re-enabled.

use log::{debug, info, warn};

use crate::api::AutomationApi;
use crate::automation::Automation;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::form::Form;
use crate::outcome::{plain_text, ExecutionResult, RunRequest};
use crate::validation::{harvest, invalid_fields, validate};
use crate::view::{AutomationDetails, OutputStyle, RunAction, View, LOADING_MESSAGE};

pub const VALIDATION_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing selected.
    Idle,
    /// An automation is selected and no run is in flight.
    Ready,
    /// A run request is in flight.
    Running,
}

pub struct AutomationController<A: AutomationApi, V: View> {
    api: A,
    view: V,
    catalog: Catalog,
    selected: Option<Automation>,
    form: Form,
    state: ControllerState,
}

impl<A: AutomationApi, V: View> AutomationController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            catalog: Catalog::default(),
            selected: None,
            form: Form::empty(),
            state: ControllerState::Idle,
        }
    }

    /// Renders the idle page and loads the catalog. Returns whether the
    /// catalog could be loaded.
    pub fn start(&mut self) -> bool {
        self.render_selection();
        self.load_catalog()
    }

    /// Fetches the catalog and re-renders the selector.
    ///
    /// On failure the error is shown and the previous catalog is kept. On
    /// success the selection is reset, since the selector starts over at its
    /// placeholder.
    pub fn load_catalog(&mut self) -> bool {
        match Catalog::load(&self.api) {
            Ok(catalog) => {
                self.catalog = catalog;
                self.view.render_selector(&self.catalog.selector_options());
                self.selected = None;
                self.render_selection();
                true
            }
            Err(e) => {
                warn!("Failed to load automations: {e}");
                self.show_output(&format!("Failed to load automations: {e}"), OutputStyle::Error);
                false
            }
        }
    }

    /// Handles a selector change. An id that matches nothing, including the
    /// empty placeholder value, clears the selection.
    pub fn select(&mut self, automation_id: &str) {
        self.selected = self.catalog.find(automation_id).cloned();

        match &self.selected {
            Some(automation) => info!("Selected automation `{}`", automation.id),
            None => debug!("Selection cleared"),
        }

        self.render_selection();
    }

    fn render_selection(&mut self) {
        match &self.selected {
            None => {
                self.form = Form::empty();
                self.view.render_details(None);
                self.view.set_parameters_visible(false);
                self.view.render_form(&self.form);
                self.view.set_run_action(&RunAction::disabled());
                self.state = ControllerState::Idle;
            }
            Some(automation) => {
                self.form = Form::build(automation);
                self.view
                    .render_details(Some(&AutomationDetails::from(automation)));
                self.view.set_parameters_visible(true);
                self.view.set_run_action(&RunAction::ready());
                self.view.render_form(&self.form);
                self.state = ControllerState::Ready;
            }
        }
    }

    /// Parses raw input into a widget of the current form.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such widget or it rejects the input.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<()> {
        self.form.set_input(name, raw)
    }

    /// Validates the form and builds the request a run would submit, without
    /// submitting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingSelected`] when idle and [`Error::Validation`]
    /// when a required field is empty; the validation message is shown.
    pub fn prepare_request(&mut self) -> Result<RunRequest> {
        let automation_id = self
            .selected
            .as_ref()
            .map(|automation| automation.id.clone())
            .ok_or(Error::NothingSelected)?;

        if !validate(&mut self.form, &mut self.view) {
            let invalid_fields = invalid_fields(&self.form);
            info!("Not running `{automation_id}`, missing {invalid_fields:?}");
            self.show_output(VALIDATION_MESSAGE, OutputStyle::Error);
            return Err(Error::Validation { invalid_fields });
        }

        Ok(RunRequest {
            automation_id,
            parameters: harvest(&self.form),
        })
    }

    /// Runs the selected automation and shows the outcome.
    ///
    /// Transport failures are folded into [`ExecutionResult::Error`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::prepare_request`]; no request is
    /// sent in those cases.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let request = self.prepare_request()?;

        self.state = ControllerState::Running;
        self.view.set_run_action(&RunAction::running());
        self.view.show_loading(LOADING_MESSAGE);
        info!("Running automation `{}`", request.automation_id);

        let result = match self.api.run_automation(&request) {
            Ok(response) => ExecutionResult::classify(response),
            Err(e) => {
                warn!("Run request failed: {e}");
                ExecutionResult::Error(format!("Failed to execute automation: {e}"))
            }
        };
        debug!("Run finished: {result:?}");

        self.show_output(&result.message(), result.style());
        self.state = ControllerState::Ready;
        self.view.set_run_action(&RunAction::ready());

        Ok(result)
    }

    fn show_output(&mut self, message: &str, style: OutputStyle) {
        self.view.show_output(&plain_text(message), style);
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Automation> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }
}
