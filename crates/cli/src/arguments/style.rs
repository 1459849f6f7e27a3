//! How the automation's form values were given on the command line.
//!
//! Values come from `-p name=value` flags or from trailing positional
//! values, never from both at once. Named values are split into their name
//! and value here, so a malformed `-p` is reported before the catalog is
//! fetched.

use autorun_core::error::Error::{MixedParameterMode, ParameterFormat};
use autorun_core::error::Result;

/// Where the form values come from.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Style {
    /// No values given, the form keeps its defaults and is prompted for
    None,
    /// `(field name, raw value)` pairs from `-p` flags, in the order given
    Named(Vec<(String, String)>),
    /// Raw values for every field, in form order
    Positional(Vec<String>),
}

/// Implemented by argument structures that carry form values.
pub trait Provider {
    /// Returns the [`Style`] of the form values given.
    ///
    /// # Errors
    ///
    /// Returns an error if named and positional values are mixed, or a
    /// named value is not `name=value`.
    fn get_style(&self) -> Result<Style>;
}

/// Splits `name=value` at the first `=`, so values may contain `=` too.
fn split_named(argument: &str) -> Result<(String, String)> {
    match argument.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(ParameterFormat(argument.to_string())),
    }
}

/// Determines the [`Style`] from the `-p` flags and the trailing values.
///
/// # Errors
///
/// Returns [`MixedParameterMode`] if both kinds are given, and
/// [`ParameterFormat`] for a `-p` without `=` or with an empty name.
///
/// # Examples
///
/// ```rust
/// use autorun_cli::arguments::{determine, Style};
///
/// let style = determine(&["source_folder=~/Downloads".to_string()], &[]).unwrap();
/// assert_eq!(
///     style,
///     Style::Named(vec![("source_folder".to_string(), "~/Downloads".to_string())])
/// );
///
/// assert!(determine(&["~/Downloads".to_string()], &[]).is_err());
/// assert_eq!(determine(&[], &[]).unwrap(), Style::None);
/// ```
pub fn determine(named_args: &[String], positional_args: &[String]) -> Result<Style> {
    match (named_args.is_empty(), positional_args.is_empty()) {
        (false, false) => Err(MixedParameterMode),
        (false, true) => named_args
            .iter()
            .map(String::as_str)
            .map(split_named)
            .collect::<Result<Vec<_>>>()
            .map(Style::Named),
        (true, false) => Ok(Style::Positional(positional_args.to_vec())),
        (true, true) => Ok(Style::None),
    }
}
