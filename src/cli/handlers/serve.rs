//! Serve command handler

use crate::config::{Settings, StorageBackend};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Starts the server, or only validates and prints the configuration
    /// when `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config).run().await
    }

    fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.storage.backend {
            StorageBackend::Memory => println!("✓ Storage backend: in-memory"),
            StorageBackend::Postgres => println!(
                "✓ Storage backend: postgres (pool {}..={}, auto_migrate={})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
        }
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully");

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
