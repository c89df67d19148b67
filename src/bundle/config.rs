//! Layered configuration
//!
//! `defaults/docbundle.default.toml` is embedded so the documented defaults and the
//! runtime behavior stay in sync. Callers layer their own files and overrides on top with
//! [`Loader`] before deserializing into [`Settings`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::bundle::persistence::{LoadOptions, WriteOptions};

const DEFAULT_TOML: &str = include_str!("../../defaults/docbundle.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub persistence: PersistenceConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    pub types_import: String,
    pub style_directory: String,
    pub extension: String,
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub default_style: String,
}

impl Settings {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.persistence.strict,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            types_import: self.persistence.types_import.clone(),
            style_directory: self.persistence.style_directory.clone(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings from the embedded defaults alone
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
