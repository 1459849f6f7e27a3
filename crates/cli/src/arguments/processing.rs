use crate::arguments::style::Style;
use autorun_core::error::Error::ParameterCountMismatch;
use autorun_core::error::Result;
use autorun_core::form::Form;
use indexmap::IndexSet;

/// Fills form widgets from command-line arguments.
///
/// Returns the names of the widgets that were given a value, in form order
/// for positional arguments and in argument order for named ones.
///
/// # Errors
///
/// Returns an error if:
/// - A named parameter does not match any field of the form
/// - Parameter count doesn't match the number of fields (for positional parameters)
/// - A widget rejects its value
pub fn process_command_line(argument_style: &Style, form: &mut Form) -> Result<IndexSet<String>> {
    match argument_style {
        // No parameters provided, the widgets keep their defaults
        Style::None => Ok(IndexSet::new()),
        Style::Named(named_params) => process_named_parameters(named_params, form),
        Style::Positional(positional_params) => process_positional_parameters(positional_params, form),
    }
}

/// Process named parameters, already split into name and value
fn process_named_parameters(
    named_params: &[(String, String)],
    form: &mut Form,
) -> Result<IndexSet<String>> {
    let mut provided = IndexSet::new();

    for (name, value) in named_params {
        form.set_input(name, value)?;
        provided.insert(name.clone());
    }

    Ok(provided)
}

/// Process positional parameters based on widget order
fn process_positional_parameters(
    positional_params: &[String],
    form: &mut Form,
) -> Result<IndexSet<String>> {
    if positional_params.len() != form.len() {
        return Err(ParameterCountMismatch(form.len(), positional_params.len()));
    }

    let mut provided = IndexSet::new();

    for (widget, value) in form.widgets_mut().iter_mut().zip(positional_params) {
        widget.set_input(value)?;
        provided.insert(widget.name.clone());
    }

    Ok(provided)
}
