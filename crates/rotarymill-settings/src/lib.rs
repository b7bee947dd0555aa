//! RotaryMill Settings Crate
//!
//! Handles job configuration files: machine settings, job parameters,
//! persistence and validation.

pub mod config;
pub mod error;

pub use config::{JobConfig, JobKind, MachineSettings};
pub use error::{SettingsError, SettingsResult};
