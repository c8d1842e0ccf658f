// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the serde-backed raw model and validated views (`model.rs`).
//! - Read an optional TOML file and overlay the environment (`loader.rs`).
//! - Turn raw settings into per-handler settings, rejecting missing
//!   required values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{env_snapshot, load_from_path, load_settings, overlay_env, EnvVars};
pub use model::{AwsSettings, LoggingSettings, NotifierSettings, RawSettings, RelaunchSettings};
