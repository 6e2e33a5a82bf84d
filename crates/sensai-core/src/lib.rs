//! Core library for the SensAI course-creation client.
//!
//! Holds everything that does not touch the terminal: configuration, logging
//! setup, the auth bridge, form definitions, the backend client, the wizard
//! state machine and the result-view model.

pub mod auth;
pub mod backend;
pub mod config;
pub mod forms;
pub mod logging;
pub mod response;
pub mod wizard;
