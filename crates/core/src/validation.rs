//! Harvesting and required-field validation of the rendered form.

use indexmap::IndexMap;
use log::debug;

use crate::automation::FieldValue;
use crate::form::{Form, Widget};
use crate::view::View;

/// Parameter values keyed by parameter name.
pub type Harvest = IndexMap<String, FieldValue>;

/// Reads every tagged widget into a name to value mapping. Checkboxes yield a
/// boolean and everything else a string. Widgets without a name are skipped.
#[must_use]
pub fn harvest(form: &Form) -> Harvest {
    form.widgets()
        .iter()
        .filter(|widget| !widget.name.is_empty())
        .map(|widget| (widget.name.clone(), widget.value()))
        .collect()
}

/// Whether a single widget satisfies its required-ness.
///
/// Checkboxes have no empty state and always pass.
#[must_use]
pub fn is_satisfied(widget: &Widget) -> bool {
    if !widget.required || widget.kind.is_checkbox() {
        return true;
    }

    match widget.value() {
        FieldValue::Text(text) => !text.trim().is_empty(),
        FieldValue::Flag(_) => true,
    }
}

/// Checks every required widget and refreshes the error markers on the form
/// and the view, including on a failing pass.
pub fn validate<V: View>(form: &mut Form, view: &mut V) -> bool {
    let mut is_valid = true;

    for widget in form.widgets_mut() {
        if widget.name.is_empty() || !widget.required {
            continue;
        }

        let satisfied = is_satisfied(widget);
        if !satisfied {
            debug!("Required field `{}` is empty", widget.name);
            is_valid = false;
        }

        widget.invalid = !satisfied;
        view.set_field_error(&widget.name, !satisfied);
    }

    is_valid
}

/// Names of the widgets currently marked invalid.
#[must_use]
pub fn invalid_fields(form: &Form) -> Vec<String> {
    form.widgets()
        .iter()
        .filter(|widget| widget.invalid)
        .map(|widget| widget.name.clone())
        .collect()
}
