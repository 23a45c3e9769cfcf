//! Configuration management for `revector.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── generate   # [generate]
//! │   └── serve      # [serve]
//! ├── types/         # ConfigError
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # RevectorConfig (this file)
//! ```
//!
//! The file is optional: without one every section uses its defaults.
//! CLI flags override file values.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{GenerateConfig, ServeConfig};
pub use types::ConfigError;

use crate::{
    cli::{Cli, Commands, OptimizeArgs},
    debug, log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing revector.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevectorConfig {
    /// Absolute path to the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Generation defaults
    #[serde(default)]
    pub generate: GenerateConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl RevectorConfig {
    /// Load configuration for the parsed CLI.
    ///
    /// Searches upward from cwd for the config file, then applies CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Optimize { args } => self.apply_optimize_args(args),
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
        }
    }

    /// Apply optimize arguments from CLI.
    fn apply_optimize_args(&mut self, args: &OptimizeArgs) {
        Self::update_option(&mut self.generate.framework, args.framework.as_ref());
        Self::update_option(&mut self.generate.typescript, args.typescript.as_ref());
        Self::update_option(&mut self.generate.markup_only, args.markup_only.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RevectorConfig {
    let (parsed, ignored) = RevectorConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Framework;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(RevectorConfig::from_str("[generate\nframework = \"vue\"").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = RevectorConfig::default();
        assert!(config.config_path.is_none());
        assert_eq!(config.generate.framework, Framework::React);
        assert_eq!(config.serve.port, 5280);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[generate]\nframework = \"vue\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = RevectorConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.generate.framework, Framework::Vue);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("revector.toml");
        fs::write(&path, "[serve]\nport = 9000").unwrap();

        let config = RevectorConfig::from_path(&path).unwrap();
        assert_eq!(config.serve.port, 9000);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = RevectorConfig::from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = test_parse_config("[generate]\nframework = \"vue\"\ntypescript = true");
        let cli = Cli::parse_from(["revector", "optimize", "-f", "react", "--typescript=false", "icon.svg"]);

        config.apply_command_options(&cli);

        assert_eq!(config.generate.framework, Framework::React);
        assert!(!config.generate.typescript);
        assert!(!config.generate.markup_only);
    }

    #[test]
    fn test_serve_overrides() {
        let mut config = RevectorConfig::default();
        let cli = Cli::parse_from(["revector", "serve", "-p", "6000"]);

        config.apply_command_options(&cli);

        assert_eq!(config.serve.port, 6000);
    }
}
