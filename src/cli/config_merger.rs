//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override configuration file values, which override defaults.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration the way `cli` asks for it.
    ///
    /// `--config` selects a single file and `--env` selects the environment
    /// layer; otherwise the loader falls back to `EMPATIA_*` variables.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path.clone());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Returns a copy of the base configuration with CLI overrides applied
    /// and re-validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // Command-level log level wins over the global flags.
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use clap::Parser;

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base_config() {
        let base = Settings::default();
        let merger = ConfigurationMerger::new(base.clone());
        assert_eq!(merger.config(), &base);

        let merged = merge(&["empatia-api"]).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["empatia-api", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["empatia-api", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&["empatia-api", "serve", "--host", "0.0.0.0", "--port", "9000"]).unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9000);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["empatia-api", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let mut base = Settings::default();
        base.storage.backend = crate::config::StorageBackend::Postgres;

        let cli = Cli::try_parse_from(["empatia-api", "serve"]).unwrap();
        let result = ConfigurationMerger::new(base).merge_cli_args(&cli);

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
