use tracing::debug;

use crate::config::{Config, ConfigExt};
use crate::env::{EnvFormat, Environment};
use crate::error::ConfbindError;
use crate::format::Format;
use crate::json::JsonFormat;
use crate::toml_doc::TomlFormat;

/// Builder for binding configuration trees with one format.
///
/// Holds the format, the root path and the strictness policy so call sites
/// only deal with the tree and the source:
///
/// ```ignore
/// let mut config = AppConfig::default();
/// Binder::json().path("/app").parse_str(&mut config, &text)?;
/// let vars = Binder::env().path("APP").emit(&mut config)?;
/// ```
#[derive(Debug, Clone)]
pub struct Binder<F: Format> {
    format: F,
    path: String,
    strict: bool,
}

impl<F: Format> Binder<F> {
    pub fn new(format: F) -> Self {
        Self {
            format,
            path: String::new(),
            strict: true,
        }
    }

    /// Root path of the tree in the format's path convention (default: `""`).
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, missing mandatory values produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    /// Parse `config` from `source`. Returns whether anything was found.
    pub fn parse<C: Config>(&self, config: &mut C, source: &F::Source) -> Result<bool, ConfbindError> {
        debug!(format = F::NAME, path = %self.path, strict = self.strict, "parsing");
        config.parse(&self.format, &self.path, source, self.strict)
    }

    /// Emit `config` into an existing destination, overwriting what it
    /// already holds at the same paths.
    pub fn emit_into<C: Config>(&self, config: &mut C, dest: &mut F::Dest) -> Result<(), ConfbindError> {
        debug!(format = F::NAME, path = %self.path, strict = self.strict, "emitting");
        config.emit(&self.format, &self.path, dest, self.strict)
    }

    /// Emit `config` into a fresh destination.
    pub fn emit<C: Config>(&self, config: &mut C) -> Result<F::Dest, ConfbindError>
    where
        F::Dest: Default,
    {
        let mut dest = F::Dest::default();
        self.emit_into(config, &mut dest)?;
        Ok(dest)
    }
}

impl Default for Binder<EnvFormat> {
    fn default() -> Self {
        Self::new(EnvFormat)
    }
}

impl Binder<EnvFormat> {
    pub fn env() -> Self {
        Self::new(EnvFormat)
    }

    /// Parse `config` from the live process environment.
    pub fn load_env<C: Config>(&self, config: &mut C) -> Result<bool, ConfbindError> {
        self.parse(config, &Environment::process())
    }
}

impl Binder<JsonFormat> {
    pub fn json() -> Self {
        Self::new(JsonFormat)
    }

    /// Parse `config` from JSON text.
    pub fn parse_str<C: Config>(&self, config: &mut C, text: &str) -> Result<bool, ConfbindError> {
        let document: serde_json::Value = serde_json::from_str(text)?;
        self.parse(config, &document)
    }

    /// Emit `config` as pretty-printed JSON text.
    pub fn emit_string<C: Config>(&self, config: &mut C) -> Result<String, ConfbindError> {
        let mut document = serde_json::Value::Null;
        self.emit_into(config, &mut document)?;
        serde_json::to_string_pretty(&document).map_err(|e| ConfbindError::Serialize {
            format: JsonFormat::NAME,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl Binder<TomlFormat> {
    pub fn toml() -> Self {
        Self::new(TomlFormat)
    }

    /// Parse `config` from TOML text.
    pub fn parse_str<C: Config>(&self, config: &mut C, text: &str) -> Result<bool, ConfbindError> {
        let document: toml::Table = toml::from_str(text)?;
        self.parse(config, &document)
    }

    /// Emit `config` as TOML text.
    pub fn emit_string<C: Config>(&self, config: &mut C) -> Result<String, ConfbindError> {
        let document = self.emit(config)?;
        toml::to_string(&document).map_err(|e| ConfbindError::Serialize {
            format: TomlFormat::NAME,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
