use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request to `{}` failed: {}", .url, .message)]
    Transport { url: String, message: String },

    #[error("Request to `{}` returned status {}", .url, .status)]
    Status { url: String, status: u16 },

    #[error("The session has expired, please sign in again.")]
    SessionExpired,

    #[error("Please fill in all required fields")]
    Validation { invalid_fields: Vec<String> },

    #[error("No automation is selected.")]
    NothingSelected,

    #[error("Unknown automation: `{}`", .0)]
    UnknownAutomation(String),

    #[error("The current form has no field named `{}`", .0)]
    UnknownField(String),

    #[error("`{}` is not one of the choices for `{}`: {}", .value, .field, .choices.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("`{}` is not a yes/no value for `{}`", .value, .field)]
    InvalidFlag { field: String, value: String },

    #[error("Parameter `{}` should be in the format key=value.", .0)]
    ParameterFormat(String),

    #[error("Named and positional parameters cannot be mixed.")]
    MixedParameterMode,

    #[error("Expected {} positional values but {} were given.", .0, .1)]
    ParameterCountMismatch(usize, usize),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error encoding request body: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn transport_error(url: &str, message: impl ToString) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_matches_ui_text() {
        let error = Error::Validation {
            invalid_fields: vec!["path".to_string()],
        };
        assert_eq!(error.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn test_invalid_choice_lists_choices() {
        let error = Error::InvalidChoice {
            field: "mode".to_string(),
            value: "weekly".to_string(),
            choices: vec!["extension".to_string(), "date".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "`weekly` is not one of the choices for `mode`: extension, date"
        );
    }
}
