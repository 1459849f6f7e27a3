//! Run requests, run responses, and how a response is presented.

use serde::{Deserialize, Serialize};

use crate::validation::Harvest;
use crate::view::OutputStyle;

pub const GENERIC_SUCCESS_MESSAGE: &str = "Script completed successfully!";
pub const GENERIC_FAILURE_MESSAGE: &str = "Script failed";

/// Body posted to the run endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub automation_id: String,
    pub parameters: Harvest,
}

/// Body returned by the run endpoint. Every field is optional because the
/// server answers with one of several shapes.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub returncode: Option<i32>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task_arn: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A run that was handed off to a worker and has not finished yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedTask {
    pub message: Option<String>,
    pub task_arn: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Error(String),
    Success {
        stdout: Option<String>,
        task: Option<LaunchedTask>,
    },
    Failure {
        returncode: Option<i32>,
        stdout: Option<String>,
        stderr: Option<String>,
    },
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl ExecutionResult {
    /// Classifies a response: an error field wins, then the success flag,
    /// anything else is a failed run.
    #[must_use]
    pub fn classify(response: RunResponse) -> Self {
        if let Some(error) = present(response.error) {
            return Self::Error(error);
        }

        if response.success == Some(true) {
            let task = present(response.task_arn).map(|task_arn| LaunchedTask {
                message: present(response.message),
                task_arn,
                status: present(response.status),
            });

            return Self::Success {
                stdout: present(response.stdout),
                task,
            };
        }

        Self::Failure {
            returncode: response.returncode,
            stdout: present(response.stdout),
            stderr: present(response.stderr),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn style(&self) -> OutputStyle {
        if self.is_success() {
            OutputStyle::Success
        } else {
            OutputStyle::Error
        }
    }

    /// The text for the output panel.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Error(error) => format!("Error: {error}"),
            Self::Success {
                stdout: Some(stdout),
                ..
            } => stdout.clone(),
            Self::Success {
                stdout: None,
                task: Some(task),
            } => {
                let headline = task
                    .message
                    .as_deref()
                    .unwrap_or(GENERIC_SUCCESS_MESSAGE);
                match &task.status {
                    Some(status) => format!("{headline}\nTask: {} ({status})", task.task_arn),
                    None => format!("{headline}\nTask: {}", task.task_arn),
                }
            }
            Self::Success {
                stdout: None,
                task: None,
            } => GENERIC_SUCCESS_MESSAGE.to_string(),
            Self::Failure {
                returncode,
                stdout,
                stderr,
            } => {
                let output = stderr
                    .as_deref()
                    .or(stdout.as_deref())
                    .unwrap_or(GENERIC_FAILURE_MESSAGE);
                let code = returncode.map_or_else(|| "unknown".to_string(), |code| code.to_string());
                format!("Script failed with return code {code}:\n{output}")
            }
        }
    }
}

/// Strips terminal markup from server-provided text so it is only ever shown
/// literally. Escape sequences are dropped whole; other control characters
/// except newline and tab are removed.
#[must_use]
pub fn plain_text(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => match chars.peek() {
                // CSI: parameters and intermediates up to a final byte in @..~
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\u{7}' {
                            break;
                        }
                        if next == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            },
            '\n' | '\t' => plain.push(c),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    plain.push('\n');
                }
            }
            c if c.is_control() => {}
            c => plain.push(c),
        }
    }

    plain
}
