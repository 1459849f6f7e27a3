use std::io::{BufRead, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use log::debug;

use super::colors::HINT_COLOR;
use super::types::RunChoice;
use autorun_core::error::Result;
use autorun_core::form::{Form, Widget, WidgetKind};
use autorun_core::outcome::plain_text;
use autorun_core::validation::is_satisfied;

/// Prompts the user for a widget's value and stores it in the widget.
///
/// Empty input keeps the current value, except for a required field that is
/// still empty, which is asked again. Input the widget rejects is reported
/// and asked again. Text areas read lines until an empty one.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn prompt_value<R: BufRead, W: Write>(
    widget: &mut Widget,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        write_prompt(widget, output)?;

        let Some(read_value) = read_widget_input(widget, input)? else {
            // End of input, leave the widget as it is
            return Ok(());
        };

        if read_value.is_empty() {
            if !is_satisfied(widget) {
                // Required, no input and nothing to fall back to - loop again
                continue;
            }
            return Ok(());
        }

        match widget.set_input(&read_value) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!("Rejected input for `{}`: {e}", widget.name);
                queue!(
                    output,
                    SetForegroundColor(Color::Red),
                    Print(plain_text(&e.to_string())),
                    ResetColor,
                    Print("\n")
                )?;
            }
        }
    }
}

fn write_prompt<W: Write>(widget: &Widget, output: &mut W) -> Result<()> {
    // Labels, options, placeholders and defaults all come from the server
    let label = plain_text(&widget.label);

    match &widget.kind {
        WidgetKind::Select { options, .. } => {
            queue!(output, Print(format!("{label}:\n")))?;
            for (i, option) in options.iter().enumerate() {
                queue!(output, Print(format!("{:>4}) {}\n", i + 1, plain_text(option))))?;
            }
            queue!(output, Print("Choice"))?;
        }
        WidgetKind::Checkbox { .. } => {
            queue!(output, Print(format!("{label} (y/n)")))?;
        }
        WidgetKind::TextArea { .. } => {
            queue!(
                output,
                Print(format!("Value for {label}")),
                SetForegroundColor(HINT_COLOR),
                Print(" (finish with an empty line)"),
                ResetColor
            )?;
        }
        WidgetKind::Text { .. } => {
            queue!(output, Print(format!("Value for {label}")))?;
        }
    }

    if let Some(placeholder) = widget.kind.placeholder() {
        queue!(
            output,
            SetForegroundColor(HINT_COLOR),
            Print(format!(" (e.g. {})", plain_text(placeholder))),
            ResetColor
        )?;
    }

    let current = match &widget.kind {
        WidgetKind::Checkbox { checked } => Some(if *checked { "y" } else { "n" }.to_string()),
        _ => widget.value().as_text().filter(|value| !value.is_empty()).map(|value| {
            // Multi-line values are shown on one line
            plain_text(value).replace('\n', "\\n")
        }),
    };

    match current {
        Some(current) => queue!(output, Print(format!(" [{current}]: ")))?,
        None => queue!(output, Print(": "))?,
    }

    if matches!(widget.kind, WidgetKind::TextArea { .. }) {
        queue!(output, Print("\n"))?;
    }

    output.flush()?;
    Ok(())
}

/// Reads one line, or several for a text area. `None` at end of input.
fn read_widget_input<R: BufRead>(widget: &Widget, input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if !matches!(widget.kind, WidgetKind::TextArea { .. }) {
        return Ok(Some(line.trim().to_string()));
    }

    let mut lines = Vec::new();
    loop {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        lines.push(trimmed.to_string());

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
    }

    Ok(Some(lines.join("\n")))
}

/// Confirms with the user whether the automation should be run
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn confirm_automation_should_run<R: BufRead, W: Write>(
    has_params: bool,
    input: &mut R,
    output: &mut W,
) -> Result<RunChoice> {
    loop {
        let prompt_change_params = if has_params {
            "/[c]hange parameters"
        } else {
            ""
        };

        queue!(
            output,
            Print(format!(
                "Are you sure you want to run? ([Y]es/[n]o{prompt_change_params}): "
            ))
        )?;
        output.flush()?;

        // Read user input
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(RunChoice::No);
        }

        let lowercase_input = line.trim().to_lowercase();

        if lowercase_input.as_str() == "y" || lowercase_input.is_empty() {
            return Ok(RunChoice::Yes);
        }

        if lowercase_input.as_str() == "n" {
            return Ok(RunChoice::No);
        }

        if has_params && lowercase_input.as_str() == "c" {
            return Ok(RunChoice::ChangeParams);
        }
    }
}

/// Fills in the form by prompting for each widget in order.
///
/// With `only_invalid`, only the widgets marked invalid by the last
/// validation are asked for.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn fill_parameter_values<R: BufRead, W: Write>(
    form: &mut Form,
    only_invalid: bool,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    for widget in form.widgets_mut() {
        if only_invalid && !widget.invalid {
            continue;
        }

        prompt_value(widget, input, output)?;
    }

    Ok(())
}
