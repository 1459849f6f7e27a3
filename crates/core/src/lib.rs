//! Autorun Core Library
//!
//! This crate provides the core functionality for autorun, a client for
//! servers that expose scripts as named "automations" through a list/run API.
//! It renders a form for an automation's declared parameters, validates and
//! submits the values, and presents the result.
//!
//! # Key Features
//!
//! - **Catalog Loading**: Fetch the automations a server offers
//! - **Form Synthesis**: One typed widget per declared parameter
//! - **Validation**: Required-field checks with per-widget error markers
//! - **Execution**: A small state machine around the run request
//! - **Task Follow-up**: Status, stop and wait for runs handed off to a container
//! - **View Handles**: Front ends implement [`view::View`]; tests use [`view::MemoryView`]
//!
//! # Examples
//!
//! Driving the controller against a server:
//!
//! ```no_run
//! use autorun_core::api::HttpApi;
//! use autorun_core::config::Settings;
//! use autorun_core::controller::AutomationController;
//! use autorun_core::view::MemoryView;
//!
//! let mut controller = AutomationController::new(HttpApi::new(Settings::default()), MemoryView::new());
//! if controller.start() {
//!     controller.select("file_organizer");
//!     controller.set_field("source_folder", "~/Downloads")?;
//!     let result = controller.run()?;
//!     println!("{}", result.message());
//! }
//! # Ok::<(), autorun_core::error::Error>(())
//! ```

pub mod api;
pub mod automation;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod outcome;
pub mod session;
pub mod task;
pub mod validation;
pub mod view;
