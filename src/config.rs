//! Compiler configuration and the settings file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::compiler::NamingOptions;
use crate::dialect::{Capabilities, Dialect};
use crate::error::{SqlDomError, SqlDomResult};
use crate::translator::{IdentifierQuoting, Translator};

/// Options of a single compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Naming options at the start of every statement
    pub naming: NamingOptions,
    /// Prefix of generated parameter names
    pub parameter_prefix: String,
    /// Emit schema names as placeholders resolved at render time
    pub schema_placeholders: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            naming: NamingOptions::default(),
            parameter_prefix: "p".to_string(),
            schema_placeholders: false,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }
}

/// Builder for CompilerConfig
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    pub fn naming(mut self, naming: NamingOptions) -> Self {
        self.config.naming = naming;
        self
    }

    /// Compile without table aliases.
    pub fn without_aliasing(mut self) -> Self {
        self.config.naming.remove(NamingOptions::TABLE_ALIASING);
        self
    }

    pub fn parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.parameter_prefix = prefix.into();
        self
    }

    pub fn schema_placeholders(mut self, enabled: bool) -> Self {
        self.config.schema_placeholders = enabled;
        self
    }

    pub fn build(self) -> CompilerConfig {
        self.config
    }
}

/// Contents of `config.toml`.
///
/// ```toml
/// dialect = "sqlserver"
/// quoting = { opener = "\"", closer = "\"", escape = "\"\"" }
///
/// [compiler]
/// parameter_prefix = "arg"
///
/// [capabilities]
/// multicolumn_in = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dialect: Dialect,
    /// Replaces the dialect's identifier quoting
    pub quoting: Option<IdentifierQuoting>,
    pub compiler: CompilerConfig,
    /// Flags overriding the dialect's capabilities
    pub capabilities: toml::Table,
}

impl Settings {
    /// `<config dir>/sqldom/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sqldom").join("config.toml"))
    }

    /// Load settings from `path`, or from the default location when it
    /// exists. Missing default settings are not an error.
    pub fn load(path: Option<&Path>) -> SqlDomResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        debug!(path = %path.display(), "loading settings");
        let text = fs::read_to_string(&path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> SqlDomResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The dialect's capabilities with this file's overrides applied.
    pub fn capabilities(&self) -> SqlDomResult<Capabilities> {
        let mut merged = serde_json::to_value(self.dialect.capabilities())?;
        let flags = merged
            .as_object_mut()
            .ok_or_else(|| SqlDomError::Config("capabilities are not a table".to_string()))?;
        for (name, value) in &self.capabilities {
            flags.insert(name.clone(), serde_json::to_value(value)?);
        }
        serde_json::from_value(merged)
            .map_err(|e| SqlDomError::Config(format!("invalid capability override: {e}")))
    }

    pub fn translator(&self) -> Box<dyn Translator> {
        match &self.quoting {
            Some(quoting) => self.dialect.translator_with(quoting.clone()),
            None => self.dialect.translator(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CompilerConfig::builder()
            .without_aliasing()
            .parameter_prefix("arg")
            .build();
        assert!(!config.naming.contains(NamingOptions::TABLE_ALIASING));
        assert!(config.naming.contains(NamingOptions::TABLE_QUALIFIED_COLUMNS));
        assert_eq!(config.parameter_prefix, "arg");
    }

    #[test]
    fn test_settings_override_dialect_capabilities() {
        let settings = Settings::from_toml(
            r#"
            dialect = "sqlserver"

            [capabilities]
            multicolumn_in = true
            "#,
        )
        .unwrap();
        let caps = settings.capabilities().unwrap();
        assert!(caps.multicolumn_in);
        // Untouched flags keep the dialect's value
        assert!(caps.clustered_indexes);
        assert_eq!(settings.translator().name(), "sqlserver");
    }

    #[test]
    fn test_unknown_capability_is_rejected() {
        let settings = Settings::from_toml("[capabilities]\nteleport = true").unwrap();
        assert!(matches!(settings.capabilities(), Err(SqlDomError::Config(_))));
    }

    #[test]
    fn test_quoting_override() {
        let settings = Settings::from_toml(
            r#"
            dialect = "mysql"
            quoting = { opener = '"', closer = '"', escape = '""' }
            "#,
        )
        .unwrap();
        assert_eq!(settings.translator().quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
