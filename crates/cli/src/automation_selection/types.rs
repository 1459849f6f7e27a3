//! Type definitions for automation selection.

use std::fmt::{Display, Formatter};

use autorun_core::outcome::plain_text;

/// Represents the user's automation selection choice.
///
/// This enum captures the different ways a user can select an automation,
/// whether through the interactive prompt or on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationChoice {
    /// Zero-based position in the catalog
    Index(usize),
    AutomationId(String),
    Quit,
}

impl AutomationChoice {
    /// Interprets a command-line automation argument: a 1-based index when
    /// it is numeric, otherwise an automation id.
    #[must_use]
    pub fn from_argument(argument: &str) -> Self {
        match argument.parse::<usize>() {
            Ok(index) if index > 0 => Self::Index(index - 1),
            _ => Self::AutomationId(argument.to_string()),
        }
    }
}

/// Represents the user's choice when confirming a run.
///
/// After an automation is selected and parameters are filled, the user
/// is prompted to confirm execution with these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    Yes,
    No,
    ChangeParams,
}

/// A catalog entry as listed in the selection prompt.
pub struct AutomationForDisplay<'a> {
    /// Zero-based position in the catalog
    pub index: usize,
    pub name: &'a str,
    pub description: &'a str,
}

impl Display for AutomationForDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}. {}", self.index + 1, plain_text(self.name))?;
        if !self.description.is_empty() {
            write!(f, " - {}", plain_text(self.description))?;
        }
        Ok(())
    }
}
