//! Interactive automation selection and user input handling.
//!
//! This module provides the terminal-based user interface for autorun,
//! including automation selection, parameter input, confirmation and the
//! terminal rendition of the controller's view.
//!
//! # Key Features
//!
//! - **Numbered Automation List**: The catalog printed once it loads
//! - **Fuzzy Search**: Pick an automation by typing part of its name
//! - **Parameter Prompting**: Interactive input for each form field
//! - **Run Confirmation**: Confirmation dialog before execution
//!
//! All prompts read from any [`std::io::BufRead`] and write to any
//! [`std::io::Write`], so they run against stdin/stdout or in-memory buffers.

// Export public items from submodules
pub mod colors;
pub mod input;
pub mod terminal;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{confirm_automation_should_run, fill_parameter_values, prompt_value};
pub use terminal::TerminalView;
pub use types::{AutomationChoice, RunChoice};
pub use ui::prompt_for_automation_choice;

/// Input used to leave the selection prompt
pub const QUIT_OPTION: char = 'q';
