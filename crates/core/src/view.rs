//! View handles the controller draws through.
//!
//! The controller never touches a concrete UI. Everything it shows goes through
//! [`View`] (the selectable, runnable form) or [`CatalogListView`] (the
//! signed-in, read-only listing), so front ends can be swapped and tests can
//! use [`MemoryView`].

use std::fmt::{Display, Formatter};

use crate::automation::Automation;
use crate::form::Form;
use crate::session::UserProfile;

/// Label of the run action while idle.
pub const RUN_LABEL: &str = "Run Automation";
/// Label of the run action while a request is in flight.
pub const RUNNING_LABEL: &str = "Running...";
/// Text shown in the output panel while a request is in flight.
pub const LOADING_MESSAGE: &str = "Executing automation...";

/// One entry of the automation selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    /// Automation id; empty for the "no selection" placeholder.
    pub value: String,
    pub label: String,
}

impl SelectorOption {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Name and description block shown for the selected automation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationDetails {
    pub name: String,
    pub description: String,
}

impl From<&Automation> for AutomationDetails {
    fn from(automation: &Automation) -> Self {
        Self {
            name: automation.name.clone(),
            description: automation.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAction {
    pub enabled: bool,
    pub label: String,
}

impl RunAction {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            label: RUN_LABEL.to_string(),
        }
    }

    #[must_use]
    pub fn ready() -> Self {
        Self {
            enabled: true,
            label: RUN_LABEL.to_string(),
        }
    }

    #[must_use]
    pub fn running() -> Self {
        Self {
            enabled: false,
            label: RUNNING_LABEL.to_string(),
        }
    }
}

/// Style class of the output panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Success,
    Error,
}

impl Display for OutputStyle {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

pub trait View {
    fn render_selector(&mut self, options: &[SelectorOption]);

    /// `None` clears the details block.
    fn render_details(&mut self, details: Option<&AutomationDetails>);

    fn set_parameters_visible(&mut self, visible: bool);

    /// Replaces whatever form was rendered before.
    fn render_form(&mut self, form: &Form);

    fn set_run_action(&mut self, action: &RunAction);

    fn set_field_error(&mut self, name: &str, invalid: bool);

    fn show_loading(&mut self, message: &str);

    /// `message` is plain text and must never be interpreted as markup.
    fn show_output(&mut self, message: &str, style: OutputStyle);
}

pub trait CatalogListView {
    fn render_signed_in_user(&mut self, profile: &UserProfile);

    fn render_catalog_list(&mut self, automations: &[Automation]);

    fn redirect_to_login(&mut self, login_url: &str);

    fn show_error(&mut self, message: &str);
}

/// Something a [`MemoryView`] was asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Selector(usize),
    Details(Option<AutomationDetails>),
    ParametersVisible(bool),
    Form(Vec<String>),
    RunAction(RunAction),
    FieldError(String, bool),
    Loading(String),
    Output(String, OutputStyle),
    SignedInUser(UserProfile),
    CatalogList(Vec<String>),
    Redirect(String),
    Error(String),
}

/// A view that keeps everything in memory.
#[derive(Debug, Clone)]
pub struct MemoryView {
    pub selector: Vec<SelectorOption>,
    pub details: Option<AutomationDetails>,
    pub parameters_visible: bool,
    pub form: Form,
    pub run_action: RunAction,
    pub error_fields: Vec<String>,
    pub output_visible: bool,
    pub loading: Option<String>,
    pub output: Option<(String, OutputStyle)>,
    pub catalog_list: Vec<String>,
    pub redirected_to: Option<String>,
    pub events: Vec<ViewEvent>,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self {
            selector: Vec::new(),
            details: None,
            parameters_visible: false,
            form: Form::empty(),
            run_action: RunAction::disabled(),
            error_fields: Vec::new(),
            output_visible: false,
            loading: None,
            output: None,
            catalog_list: Vec::new(),
            redirected_to: None,
            events: Vec::new(),
        }
    }
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn output_text(&self) -> Option<&str> {
        self.output.as_ref().map(|(text, _)| text.as_str())
    }

    #[must_use]
    pub fn output_style(&self) -> Option<OutputStyle> {
        self.output.as_ref().map(|(_, style)| *style)
    }

    #[must_use]
    pub fn has_error_marker(&self, name: &str) -> bool {
        self.error_fields.iter().any(|field| field == name)
    }
}

impl View for MemoryView {
    fn render_selector(&mut self, options: &[SelectorOption]) {
        self.selector = options.to_vec();
        self.events.push(ViewEvent::Selector(options.len()));
    }

    fn render_details(&mut self, details: Option<&AutomationDetails>) {
        self.details = details.cloned();
        self.events.push(ViewEvent::Details(details.cloned()));
    }

    fn set_parameters_visible(&mut self, visible: bool) {
        self.parameters_visible = visible;
        self.events.push(ViewEvent::ParametersVisible(visible));
    }

    fn render_form(&mut self, form: &Form) {
        self.form = form.clone();
        // Markers belong to widgets, so a new form starts without any.
        self.error_fields.clear();
        self.events.push(ViewEvent::Form(
            form.widgets().iter().map(|w| w.name.clone()).collect(),
        ));
    }

    fn set_run_action(&mut self, action: &RunAction) {
        self.run_action = action.clone();
        self.events.push(ViewEvent::RunAction(action.clone()));
    }

    fn set_field_error(&mut self, name: &str, invalid: bool) {
        self.error_fields.retain(|field| field != name);
        if invalid {
            self.error_fields.push(name.to_string());
        }
        self.events
            .push(ViewEvent::FieldError(name.to_string(), invalid));
    }

    fn show_loading(&mut self, message: &str) {
        self.output_visible = true;
        self.loading = Some(message.to_string());
        self.output = None;
        self.events.push(ViewEvent::Loading(message.to_string()));
    }

    fn show_output(&mut self, message: &str, style: OutputStyle) {
        self.output_visible = true;
        self.loading = None;
        self.output = Some((message.to_string(), style));
        self.events
            .push(ViewEvent::Output(message.to_string(), style));
    }
}

impl CatalogListView for MemoryView {
    fn render_signed_in_user(&mut self, profile: &UserProfile) {
        self.events.push(ViewEvent::SignedInUser(profile.clone()));
    }

    fn render_catalog_list(&mut self, automations: &[Automation]) {
        self.catalog_list = automations.iter().map(ToString::to_string).collect();
        self.events
            .push(ViewEvent::CatalogList(self.catalog_list.clone()));
    }

    fn redirect_to_login(&mut self, login_url: &str) {
        self.redirected_to = Some(login_url.to_string());
        self.events.push(ViewEvent::Redirect(login_url.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.output_visible = true;
        self.output = Some((message.to_string(), OutputStyle::Error));
        self.events.push(ViewEvent::Error(message.to_string()));
    }
}
