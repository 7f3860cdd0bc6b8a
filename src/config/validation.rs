//! Configuration validation logic
//!
//! Each section checks its own ranges; `Settings::validate` also checks the
//! rules that span sections.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 127.0.0.1 for local access or 0.0.0.0 for all interfaces.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must use a PostgreSQL scheme
    /// - Max connections must be greater than 0
    /// - Min connections must not exceed max connections
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required when storage.backend is \"postgres\".",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    /// - File settings must be consistent when file output is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates every section and returns the first error encountered.
    ///
    /// The database section is only checked when the postgres backend is
    /// selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_settings() -> Settings {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Postgres;
        settings.database.url = "postgres://localhost/empatia".to_string();
        settings
    }

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_memory_backend_ignores_database_section() {
        let mut settings = Settings::default();
        settings.database.url = "not a url".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let mut settings = postgres_settings();
        assert!(settings.validate().is_ok());

        settings.database.url.clear();
        assert_eq!(field_of(settings.validate().unwrap_err()), "database.url");
    }

    #[test]
    fn test_database_url_scheme() {
        let mut settings = postgres_settings();
        settings.database.url = "mysql://localhost/empatia".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "database.url");

        settings.database.url = "postgresql://u:p@db:5432/empatia".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_pool_bounds() {
        let mut settings = postgres_settings();
        settings.database.min_connections = 20;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "database.min_connections"
        );

        let mut settings = postgres_settings();
        settings.database.max_connections = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "database.max_connections"
        );
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert_eq!(field_of(settings.validate().unwrap_err()), "server.port");
    }

    #[test]
    fn test_logger_rules() {
        let mut settings = Settings::default();
        settings.logger.level = "verbose".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");

        let mut settings = Settings::default();
        settings.logger.console.enabled = false;
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");

        let mut settings = Settings::default();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.file.path");
    }
}
