//! Configuration module for sealed-keys
//!
//! This module provides configuration management including:
//! - Generator settings persistence
//! - Master material resolution from the environment
//! - Env file parsing

pub mod env_file;
pub mod master;
pub mod settings;

pub use env_file::EnvFile;
pub use master::MasterMaterial;
pub use settings::{GeneratorSettings, MasterVars, OutputFormat, SecretSpec};
