//! The controller's view, rendered as lines on a terminal.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use itertools::Itertools;
use log::{debug, error};

use super::colors::{AsTermColor, HEADING_COLOR, HINT_COLOR};
use autorun_core::automation::Automation;
use autorun_core::form::{Form, Widget, WidgetKind};
use autorun_core::outcome::plain_text;
use autorun_core::session::UserProfile;
use autorun_core::view::{
    AutomationDetails, CatalogListView, OutputStyle, RunAction, SelectorOption, View,
};

/// Writes view updates to any [`Write`]. Write failures are logged rather
/// than returned, since the view traits cannot fail.
///
/// Every string that originates from the server passes through
/// [`plain_text`] before it is written, so a catalog cannot move the cursor,
/// clear the screen or talk to the terminal through escape sequences.
pub struct TerminalView<W: Write> {
    out: W,
    parameters_visible: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            parameters_visible: false,
        }
    }

    fn emit(&mut self, draw: impl FnOnce(&mut W) -> io::Result<()>) {
        if let Err(e) = draw(&mut self.out).and_then(|()| self.out.flush()) {
            error!("Failed to write to the terminal: {e}");
        }
    }
}

fn widget_hint(widget: &Widget) -> Option<String> {
    match &widget.kind {
        WidgetKind::Select { options, .. } if !options.is_empty() => {
            Some(format!("one of: {}", options.iter().map(|o| plain_text(o)).join(", ")))
        }
        WidgetKind::Select { .. } => None,
        WidgetKind::Checkbox { .. } => Some("yes/no".to_string()),
        WidgetKind::TextArea { .. } => Some("multi-line".to_string()),
        WidgetKind::Text { .. } => widget
            .kind
            .placeholder()
            .map(|p| format!("e.g. {}", plain_text(p))),
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_selector(&mut self, options: &[SelectorOption]) {
        let entries = options
            .iter()
            .filter(|option| !option.is_placeholder())
            .collect_vec();

        self.emit(|out| {
            if entries.is_empty() {
                return queue!(out, Print("No automations available.\n"));
            }

            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print("Automations:\n"),
                SetAttribute(Attribute::Reset)
            )?;
            for (i, option) in entries.iter().enumerate() {
                queue!(
                    out,
                    Print(format!("{:>4}. {}\n", i + 1, plain_text(&option.label)))
                )?;
            }
            Ok(())
        });
    }

    fn render_details(&mut self, details: Option<&AutomationDetails>) {
        let Some(details) = details else {
            return;
        };

        self.emit(|out| {
            queue!(
                out,
                Print("\n"),
                SetForegroundColor(HEADING_COLOR),
                SetAttribute(Attribute::Bold),
                Print(plain_text(&details.name)),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Print("\n")
            )?;
            if !details.description.is_empty() {
                queue!(out, Print(plain_text(&details.description)), Print("\n"))?;
            }
            Ok(())
        });
    }

    fn set_parameters_visible(&mut self, visible: bool) {
        self.parameters_visible = visible;
    }

    fn render_form(&mut self, form: &Form) {
        if !self.parameters_visible {
            return;
        }

        self.emit(|out| {
            if form.is_empty() {
                return queue!(out, Print("This automation takes no parameters.\n"));
            }

            queue!(out, Print("Parameters:\n"))?;
            for widget in form.widgets() {
                queue!(out, Print(format!("  - {}", plain_text(&widget.label))))?;
                if let Some(hint) = widget_hint(widget) {
                    queue!(
                        out,
                        SetForegroundColor(HINT_COLOR),
                        Print(format!(" ({hint})")),
                        ResetColor
                    )?;
                }
                queue!(out, Print("\n"))?;
            }
            Ok(())
        });
    }

    fn set_run_action(&mut self, action: &RunAction) {
        debug!(
            "Run action `{}` is {}",
            action.label,
            if action.enabled { "enabled" } else { "disabled" }
        );
    }

    fn set_field_error(&mut self, name: &str, invalid: bool) {
        if !invalid {
            return;
        }

        self.emit(|out| {
            queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(format!("Missing a value for `{}`\n", plain_text(name))),
                ResetColor
            )
        });
    }

    fn show_loading(&mut self, message: &str) {
        self.emit(|out| {
            queue!(
                out,
                SetForegroundColor(HINT_COLOR),
                Print(plain_text(message)),
                ResetColor,
                Print("\n")
            )
        });
    }

    fn show_output(&mut self, message: &str, style: OutputStyle) {
        self.emit(|out| {
            queue!(
                out,
                SetForegroundColor(style.as_crossterm_color()),
                Print(plain_text(message)),
                ResetColor,
                Print("\n")
            )
        });
    }
}

impl<W: Write> CatalogListView for TerminalView<W> {
    fn render_signed_in_user(&mut self, profile: &UserProfile) {
        let profile = plain_text(&profile.to_string());
        self.emit(|out| queue!(out, Print(format!("Signed in as {profile}\n\n"))));
    }

    fn render_catalog_list(&mut self, automations: &[Automation]) {
        self.emit(|out| {
            if automations.is_empty() {
                return queue!(out, Print("No automations available.\n"));
            }

            for automation in automations {
                queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(plain_text(&automation.name)),
                    SetAttribute(Attribute::Reset)
                )?;
                if !automation.description.is_empty() {
                    queue!(out, Print(format!(": {}", plain_text(&automation.description))))?;
                }
                queue!(out, Print("\n"))?;

                if !automation.parameters.is_empty() {
                    let names = automation
                        .parameters
                        .iter()
                        .map(|parameter| plain_text(parameter.display_label()))
                        .join(", ");
                    queue!(
                        out,
                        SetForegroundColor(HINT_COLOR),
                        Print(format!("    parameters: {names}\n")),
                        ResetColor
                    )?;
                }
            }
            Ok(())
        });
    }

    fn redirect_to_login(&mut self, login_url: &str) {
        self.emit(|out| {
            queue!(
                out,
                Print(format!(
                    "Please sign in at {login_url}, then store your token with `autorun --save-token <TOKEN>`.\n"
                ))
            )
        });
    }

    fn show_error(&mut self, message: &str) {
        self.emit(|out| {
            queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(plain_text(message)),
                ResetColor,
                Print("\n")
            )
        });
    }
}
