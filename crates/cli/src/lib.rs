//! Autorun CLI Library
//!
//! This crate provides the command-line interface for autorun, a client for
//! a server that hosts parameterized automations. It handles catalog
//! browsing, automation selection, parameter input, confirmation and the
//! display of run results.
//!
//! # Key Features
//!
//! - **Interactive Automation Selection**: Numbered list with fuzzy search
//! - **Parameter Processing**: Support for named parameters and positional argument input
//! - **Run Confirmation**: Interactive confirmation before an automation runs
//! - **Signed-in Catalog**: A read-only listing for a stored access token
//!
//! # Architecture
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`automation_selection`]: Prompts, confirmation and the terminal view
//! - [`arguments`]: Argument processing for both named and positional styles
//!
//! # Examples
//!
//! The CLI binary (`autorun`) can be used in several ways:
//!
//! ```bash
//! # Interactive mode - lists the catalog and prompts for everything
//! autorun
//!
//! # Run an automation by ID or 1-based index
//! autorun file_organizer
//!
//! # With named parameters
//! autorun file_organizer --param source_folder=/tmp --param organize_by=date
//!
//! # With positional arguments, in form order
//! autorun file_organizer /tmp date
//!
//! # Dry run (validate and print the request without sending it)
//! autorun --dry-run file_organizer -p source_folder=/tmp
//!
//! # Read-only catalog for the stored token
//! autorun --authenticated
//! ```

pub mod arguments;
pub mod automation_selection;
pub mod cli_args;
