//! Maintenance command handlers.

use super::commands::OutputFormat;
use super::env::require_maintenance_env;
use anyhow::Result;
use lodge::LodgeConfig;

#[cfg(feature = "database")]
fn content_service(config: &LodgeConfig) -> Result<std::sync::Arc<lodge::ContentService>> {
    use lodge::{ContentService, PostgresContentStore, create_pool, database_url_from_env};
    use std::sync::Arc;

    let pool = create_pool(&database_url_from_env()?, config.database.pool_size)?;
    Ok(Arc::new(ContentService::new(
        Arc::new(PostgresContentStore::new(pool)),
        config.cache.clone(),
    )))
}

/// Apply pending migrations, or list them with `dry_run`.
#[cfg(feature = "database")]
pub fn migrate(dry_run: bool) -> Result<()> {
    use lodge::{establish_connection, pending_migrations, run_migrations};

    require_maintenance_env()?;
    let mut conn = establish_connection()?;

    let names = if dry_run {
        pending_migrations(&mut conn)?
    } else {
        run_migrations(&mut conn)?
    };

    let verb = if dry_run { "Pending" } else { "Applied" };
    if names.is_empty() {
        println!("No migrations to apply");
    }
    for name in &names {
        println!("{}: {}", verb, name);
    }
    Ok(())
}

/// Insert default content rows that are not there yet.
#[cfg(feature = "database")]
pub fn seed() -> Result<()> {
    use lodge::{establish_connection, seed_defaults};

    require_maintenance_env()?;
    let mut conn = establish_connection()?;
    let report = seed_defaults(&mut conn)?;

    println!(
        "Seeded {} pages, {} blocks, {} suites, {} testimonials",
        report.pages, report.blocks, report.suites, report.testimonials
    );
    Ok(())
}

/// List pages in priority order.
#[cfg(feature = "database")]
pub async fn pages(config: &LodgeConfig, format: OutputFormat) -> Result<()> {
    require_maintenance_env()?;
    let pages = content_service(config)?.pages().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pages)?),
        OutputFormat::Human => {
            println!("{:<6} {:<20} {:<24} {}", "PRIO", "SLUG", "NAME", "TEMPLATE");
            println!("{:-<80}", "");
            for page in &pages {
                println!(
                    "{:<6} {:<20} {:<24} {}",
                    page.priority, page.slug, page.name, page.template
                );
            }
            println!("Total: {} pages", pages.len());
        }
    }
    Ok(())
}

/// List a page's blocks; drafts are included with `all`.
#[cfg(feature = "database")]
pub async fn blocks(config: &LodgeConfig, slug: &str, all: bool, format: OutputFormat) -> Result<()> {
    require_maintenance_env()?;
    let service = content_service(config)?;

    let blocks = if all {
        service.admin_page(slug).await?.blocks
    } else {
        service.published_blocks(slug).await?
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
        OutputFormat::Human => {
            println!("Blocks on '{}':", slug);
            println!("{:-<80}", "");
            for block in &blocks {
                let state = if block.is_published() { "published" } else { "draft" };
                println!("{:>3}  {:<16} {:<10} {}", block.position, block.kind, state, block.id);
            }
            println!("Total: {} blocks", blocks.len());
        }
    }
    Ok(())
}

#[cfg(not(feature = "database"))]
fn database_disabled() -> Result<()> {
    anyhow::bail!("Database feature not enabled. Rebuild with --features database")
}

#[cfg(not(feature = "database"))]
pub fn migrate(_dry_run: bool) -> Result<()> {
    require_maintenance_env()?;
    database_disabled()
}

#[cfg(not(feature = "database"))]
pub fn seed() -> Result<()> {
    require_maintenance_env()?;
    database_disabled()
}

#[cfg(not(feature = "database"))]
pub async fn pages(_config: &LodgeConfig, _format: OutputFormat) -> Result<()> {
    require_maintenance_env()?;
    database_disabled()
}

#[cfg(not(feature = "database"))]
pub async fn blocks(
    _config: &LodgeConfig,
    _slug: &str,
    _all: bool,
    _format: OutputFormat,
) -> Result<()> {
    require_maintenance_env()?;
    database_disabled()
}
