use anyhow::Context;
use persistence::db::{DEFAULT_MIGRATIONS_PATH, DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - RUN_MIGRATIONS: Apply the bundled migrations on startup (default: false)
///
/// # Errors
/// Returns error if DATABASE_URL is not set, connection fails or a migration fails
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let mut config = DatabaseConfig::new(db_url);
    if let Some(max_connections) = parse_max_connections(env::var("DATABASE_MAX_CONNECTIONS").ok()) {
        config = config.with_max_connections(max_connections);
    }

    let pool = create_postgres_pool(&config).await?;

    if parse_flag(env::var("RUN_MIGRATIONS").ok()) {
        run_migrations(&pool, DEFAULT_MIGRATIONS_PATH).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

fn parse_max_connections(raw: Option<String>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

fn parse_flag(raw: Option<String>) -> bool {
    matches!(
        raw.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_ignore_invalid_max_connections() {
        assert_eq!(parse_max_connections(Some("12".to_string())), Some(12));
        assert_eq!(parse_max_connections(Some("0".to_string())), None);
        assert_eq!(parse_max_connections(Some("many".to_string())), None);
        assert_eq!(parse_max_connections(None), None);
    }

    #[test]
    fn should_run_migrations_only_when_enabled() {
        assert!(parse_flag(Some("true".to_string())));
        assert!(parse_flag(Some("1".to_string())));
        assert!(!parse_flag(Some("false".to_string())));
        assert!(!parse_flag(None));
    }
}
