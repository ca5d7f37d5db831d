//! Core domain logic for Calconnect
//!
//! This crate contains the server settings model and the error taxonomy
//! shared by the configuration loader and the HTTP runtime.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::CalconnectError;
