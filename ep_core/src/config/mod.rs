//! Specialization declarations loaded from TOML

mod declaration;

pub use declaration::{
    DefaultsDeclaration, FactionGear, FactionRace, PresetsDeclaration, RaidSimPreset,
    SpecDeclaration, UiCapabilities,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a specialization declaration from a TOML file
pub fn load_declaration(path: &Path) -> Result<SpecDeclaration, ConfigError> {
    let declaration: SpecDeclaration = load_toml(path)?;
    tracing::debug!(spec = %declaration.id, path = %path.display(), "loaded declaration");
    Ok(declaration)
}

/// Load a specialization declaration from a TOML string
pub fn parse_declaration(content: &str) -> Result<SpecDeclaration, ConfigError> {
    parse_toml(content)
}
