//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use crate::arguments::{determine, Provider, Style};
use autorun_core::error::Result;
use clap::Parser;

/// Command-line arguments for the autorun CLI tool.
///
/// With no automation given, the catalog is listed and the user is prompted
/// for a choice and then for each parameter.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use autorun_cli::cli_args::Args;
///
/// let args = Args::parse_from(["autorun", "file_organizer", "-p", "source_folder=/tmp"]);
/// assert_eq!(args.automation_id_or_index.as_deref(), Some("file_organizer"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Path to the settings file YAML.
    ///
    /// If not provided, defaults to `~/.autorun/settings.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Base URL of the automation server, overriding the settings file.
    #[arg(long, short = 'u')]
    pub base_url: Option<String>,

    /// Path to the file that stores the access token.
    ///
    /// If not provided, defaults to `~/.autorun/credentials.yml`.
    #[arg(long)]
    pub credentials_path: Option<String>,

    /// Validate and print the request that would be sent, without running it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run without first confirming.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// Show the catalog as a signed-in, read-only list using the stored token.
    #[arg(long, short = 'a', action)]
    pub authenticated: bool,

    /// Check whether the server is healthy and exit.
    #[arg(long, action)]
    pub health: bool,

    /// Store an access token for `--authenticated` and exit.
    #[arg(long, value_name = "TOKEN")]
    pub save_token: Option<String>,

    /// Forget the stored access token and exit.
    #[arg(long, action)]
    pub clear_token: bool,

    /// Show the status of a task launched by an earlier run and exit.
    #[arg(long, value_name = "TASK_ARN", conflicts_with = "stop_task")]
    pub task_status: Option<String>,

    /// With `--task-status`, keep checking until the task has finished.
    #[arg(long, short = 'w', action, requires = "task_status")]
    pub wait: bool,

    /// Stop a task launched by an earlier run and exit.
    #[arg(long, value_name = "TASK_ARN")]
    pub stop_task: Option<String>,

    /// The automation ID or 1-based index to run directly.
    ///
    /// If not provided, interactive mode is used.
    #[arg(num_args(1))]
    pub automation_id_or_index: Option<String>,

    /// Named parameters for the automation in the format key=value.
    ///
    /// Multiple parameters can be provided with repeated `-p` flags.
    /// Cannot be mixed with positional arguments.
    ///
    /// # Examples
    /// ```bash
    /// autorun data_backup -p source=/srv -p compress=yes
    /// ```
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub parameters: Vec<String>,

    /// Positional values, filled into the form fields in declaration order.
    ///
    /// Cannot be mixed with named parameters.
    #[arg(trailing_var_arg = true)]
    pub positional_arguments: Vec<String>,
}

impl Provider for Args {
    /// Determines the argument style based on the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if both named and positional arguments are provided,
    /// or a `-p` value is not in the `name=value` format.
    fn get_style(&self) -> Result<Style> {
        determine(&self.parameters, &self.positional_arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["autorun"]);

        assert!(args.config_path.is_none());
        assert!(args.base_url.is_none());
        assert!(args.credentials_path.is_none());
        assert!(!args.dry_run);
        assert!(!args.force);
        assert!(!args.authenticated);
        assert!(!args.health);
        assert!(args.save_token.is_none());
        assert!(!args.clear_token);
        assert!(args.task_status.is_none());
        assert!(!args.wait);
        assert!(args.stop_task.is_none());
        assert!(args.automation_id_or_index.is_none());
        assert!(args.parameters.is_empty());
        assert!(args.positional_arguments.is_empty());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "autorun",
            "-c",
            "/custom/settings.yml",
            "-u",
            "http://automations.internal",
            "-d",
            "-f",
            "-a",
        ]);

        assert_eq!(args.config_path, Some("/custom/settings.yml".to_string()));
        assert_eq!(
            args.base_url,
            Some("http://automations.internal".to_string())
        );
        assert!(args.dry_run);
        assert!(args.force);
        assert!(args.authenticated);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "autorun",
            "--config-path",
            "/custom/settings.yml",
            "--credentials-path",
            "/custom/credentials.yml",
            "--dry-run",
            "--force",
            "--authenticated",
            "--health",
            "--clear-token",
            "--save-token",
            "abc",
        ]);

        assert_eq!(args.config_path, Some("/custom/settings.yml".to_string()));
        assert_eq!(
            args.credentials_path,
            Some("/custom/credentials.yml".to_string())
        );
        assert!(args.dry_run);
        assert!(args.force);
        assert!(args.authenticated);
        assert!(args.health);
        assert!(args.clear_token);
        assert_eq!(args.save_token, Some("abc".to_string()));
    }

    #[test]
    fn test_args_task_follow_up() {
        let arn = "arn:aws:ecs:eu-west-1:123:task/automation/abc";

        let args = Args::parse_from(["autorun", "--task-status", arn, "--wait"]);
        assert_eq!(args.task_status.as_deref(), Some(arn));
        assert!(args.wait);

        let args = Args::parse_from(["autorun", "--stop-task", arn]);
        assert_eq!(args.stop_task.as_deref(), Some(arn));

        assert!(Args::try_parse_from(["autorun", "--wait"]).is_err());
        assert!(Args::try_parse_from(["autorun", "--task-status", arn, "--stop-task", arn]).is_err());
    }

    #[test]
    fn test_args_named_parameters() {
        let args = Args::parse_from([
            "autorun",
            "file_organizer",
            "-p",
            "source_folder=/tmp",
            "--param",
            "organize_by=date",
        ]);

        assert_eq!(
            args.automation_id_or_index,
            Some("file_organizer".to_string())
        );
        assert_eq!(args.parameters, vec!["source_folder=/tmp", "organize_by=date"]);
        assert_eq!(
            args.get_style().unwrap(),
            Style::Named(vec![
                ("source_folder".to_string(), "/tmp".to_string()),
                ("organize_by".to_string(), "date".to_string()),
            ])
        );
    }

    #[test]
    fn test_style_provider_malformed_named() {
        let args = Args::parse_from(["autorun", "file_organizer", "-p", "source_folder"]);
        assert!(matches!(
            args.get_style(),
            Err(autorun_core::error::Error::ParameterFormat(_))
        ));
    }

    #[test]
    fn test_style_provider_positional() {
        let args = Args::parse_from(["autorun", "file_organizer", "/tmp", "date"]);
        let style = args.get_style().unwrap();
        assert_eq!(
            style,
            Style::Positional(vec!["/tmp".to_string(), "date".to_string()])
        );
        assert_eq!(
            args.automation_id_or_index,
            Some("file_organizer".to_string())
        );
    }

    #[test]
    fn test_style_provider_mixed_error() {
        let args = Args::parse_from(["autorun", "file_organizer", "-p", "a=1", "--", "value"]);
        assert!(args.get_style().is_err());
    }
}
