//! Migrate command handler
//!
//! Applies, previews or reverts the embedded migrations against the
//! configured PostgreSQL database.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_migrations};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// # Errors
    /// - Missing or malformed database configuration
    /// - Connection or migration failures
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> anyhow::Result<()> {
        // Migrations only make sense against postgres, whatever the backend says.
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            tracing::warn!(steps, "Reverting migrations");
            let reverted = revert_migrations(url, steps).await?;
            Self::report("Reverted", &reverted);
        } else {
            let applied = run_migrations(url).await?;
            Self::report("Applied", &applied);
        }

        Ok(())
    }

    fn report(action: &str, names: &[String]) {
        if names.is_empty() {
            println!("✓ Nothing to do");
            return;
        }
        println!("✓ {} {} migration(s):", action, names.len());
        for name in names {
            tracing::info!(migration = %name, "{}", action);
            println!("  - {}", name);
        }
    }
}
