//! Form synthesis for automation parameters.
//!
//! A [`Form`] is built wholesale from an [`Automation`]'s parameter list, one
//! [`Widget`] per parameter in declaration order. Every widget carries its
//! parameter name and required flag so the harvester and validator can walk
//! the form without caring which kind of input each widget is.
//!
//! Adding a new kind of input means adding a [`ParameterKind`] variant, a
//! [`WidgetKind`] variant, and an arm in [`WidgetKind::for_parameter`].

use crate::automation::{Automation, FieldValue, Parameter, ParameterKind};
use crate::error::{Error, Result};

/// Number of visible rows for multi-line inputs.
pub const TEXTAREA_ROWS: u16 = 4;

/// Marker appended to the label of required widgets.
pub const REQUIRED_MARKER: &str = " *";

const TRUE_WORDS: [&str; 6] = ["y", "yes", "true", "1", "on", "x"];
const FALSE_WORDS: [&str; 5] = ["n", "no", "false", "0", "off"];

/// The input state of a single widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Text {
        value: String,
        placeholder: String,
    },
    TextArea {
        value: String,
        placeholder: String,
        rows: u16,
    },
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    Checkbox {
        checked: bool,
    },
}

impl WidgetKind {
    /// Constructs the initial widget state for a parameter.
    #[must_use]
    pub fn for_parameter(parameter: &Parameter) -> Self {
        match parameter.kind {
            ParameterKind::TextArea => Self::TextArea {
                value: text_default(parameter),
                placeholder: parameter.placeholder.clone().unwrap_or_default(),
                rows: TEXTAREA_ROWS,
            },
            ParameterKind::Select => {
                let options = parameter.options.clone().unwrap_or_default();
                let preselected = parameter
                    .default
                    .as_ref()
                    .and_then(FieldValue::as_text)
                    .and_then(|default| options.iter().position(|option| option == default));
                // A choice widget always shows its first option unless told otherwise.
                let selected = preselected.or(if options.is_empty() { None } else { Some(0) });

                Self::Select { options, selected }
            }
            ParameterKind::Checkbox => Self::Checkbox {
                checked: parameter.default.as_ref().is_some_and(FieldValue::is_set),
            },
            ParameterKind::Text => Self::Text {
                value: text_default(parameter),
                placeholder: parameter.placeholder.clone().unwrap_or_default(),
            },
        }
    }

    /// Reads the current value out of the widget.
    #[must_use]
    pub fn value(&self) -> FieldValue {
        match self {
            Self::Text { value, .. } | Self::TextArea { value, .. } => {
                FieldValue::Text(value.clone())
            }
            Self::Select { options, selected } => FieldValue::Text(
                selected
                    .and_then(|index| options.get(index))
                    .cloned()
                    .unwrap_or_default(),
            ),
            Self::Checkbox { checked } => FieldValue::Flag(*checked),
        }
    }

    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox { .. })
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::Text { placeholder, .. } | Self::TextArea { placeholder, .. }
                if !placeholder.is_empty() =>
            {
                Some(placeholder)
            }
            _ => None,
        }
    }
}

fn text_default(parameter: &Parameter) -> String {
    parameter
        .default
        .as_ref()
        .and_then(FieldValue::as_text)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// One rendered input, tagged with the parameter it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub kind: WidgetKind,
    /// Set by validation when the widget failed the last required-field check.
    pub invalid: bool,
}

impl Widget {
    #[must_use]
    pub fn for_parameter(parameter: &Parameter) -> Self {
        let mut label = parameter.display_label().to_string();
        if parameter.required {
            label.push_str(REQUIRED_MARKER);
        }

        Self {
            name: parameter.name.clone(),
            label,
            required: parameter.required,
            kind: WidgetKind::for_parameter(parameter),
            invalid: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> FieldValue {
        self.kind.value()
    }

    /// Parses raw user input into the widget.
    ///
    /// Select widgets accept an option value or its 1-based position.
    /// Checkboxes accept yes/no style words; empty input unchecks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChoice`] or [`Error::InvalidFlag`] when the
    /// input cannot be represented by the widget.
    pub fn set_input(&mut self, raw: &str) -> Result<()> {
        match &mut self.kind {
            WidgetKind::Text { value, .. } | WidgetKind::TextArea { value, .. } => {
                *value = raw.to_string();
            }
            WidgetKind::Select { options, selected } => {
                let position = options.iter().position(|option| option == raw).or_else(|| {
                    raw.trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|index| (1..=options.len()).contains(index))
                        .map(|index| index - 1)
                });

                match position {
                    Some(index) => *selected = Some(index),
                    None => {
                        return Err(Error::InvalidChoice {
                            field: self.name.clone(),
                            value: raw.to_string(),
                            choices: options.clone(),
                        })
                    }
                }
            }
            WidgetKind::Checkbox { checked } => {
                let word = raw.trim().to_lowercase();
                if word.is_empty() || FALSE_WORDS.contains(&word.as_str()) {
                    *checked = false;
                } else if TRUE_WORDS.contains(&word.as_str()) {
                    *checked = true;
                } else {
                    return Err(Error::InvalidFlag {
                        field: self.name.clone(),
                        value: raw.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// The widgets rendered for the currently selected automation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    widgets: Vec<Widget>,
}

impl Form {
    /// Builds a fresh form for an automation. Nothing carries over from any
    /// previously built form.
    #[must_use]
    pub fn build(automation: &Automation) -> Self {
        Self {
            widgets: automation
                .parameters
                .iter()
                .map(Widget::for_parameter)
                .collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [Widget] {
        &mut self.widgets
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.name == name)
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if no widget has this name.
    pub fn widget_mut(&mut self, name: &str) -> Result<&mut Widget> {
        self.widgets
            .iter_mut()
            .find(|widget| widget.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Parses raw user input into the named widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget does not exist or rejects the input.
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<()> {
        self.widget_mut(name)?.set_input(raw)
    }
}
