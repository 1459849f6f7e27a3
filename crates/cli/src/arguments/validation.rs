use indexmap::IndexSet;

use crate::arguments::Style;
use autorun_core::form::Form;

/// Determines whether to prompt the user for parameter values.
///
/// The function avoids prompting when:
/// 1. The form has no widgets to fill
/// 2. Every widget was given a value on the command line
///
/// The function prompts when:
/// 1. No values came from the command line (always prompts, even with defaults)
/// 2. Some widgets were left out of the command-line values
///
/// Note: The user can still change parameters during the run confirmation
/// using the 'c' option.
#[must_use]
pub fn should_prompt_for_parameters(
    form: &Form,
    provided: &IndexSet<String>,
    argument_style: &Style,
) -> bool {
    // No need to prompt if nothing to fill
    if form.is_empty() {
        return false;
    }

    // For command-line arguments (Named or Positional), we only skip prompting
    // if the user has provided ALL values via the command line
    if *argument_style != Style::None {
        return !has_all_command_line_parameters(form, provided);
    }

    true
}

/// Check if every widget was explicitly given a value on the command line.
/// Defaults do not count.
fn has_all_command_line_parameters(form: &Form, provided: &IndexSet<String>) -> bool {
    form.widgets()
        .iter()
        .all(|widget| provided.contains(&widget.name))
}
