// src/config/mod.rs

//! Configuration loading and validation for aws-all.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate basic invariants like account id format (`validate.rs`).
//! - Layer CLI flags and the environment over the file (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{
    ConfigFile, ConfigSection, RawConfigFile, DEFAULT_ACCOUNT_FIELD, DEFAULT_IDENTITY_COMMAND,
    DEFAULT_TOOL,
};
pub use settings::{Settings, PATTERN_ENV};
