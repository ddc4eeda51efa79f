use crate::{auth::credentials, config::Config};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{error, info};

/// Builds the pool without touching the database, so a missing or read-only
/// file only shows up once a query runs.
pub fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options))
}

/// Creates the tables and seeds the admin credential.
pub async fn prepare(pool: &SqlitePool, config: &Config) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            roll TEXT NOT NULL,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    credentials::seed(pool, &config.admin_username, &config.admin_password).await?;

    // One check-in per roll per day. Older databases may already hold
    // duplicates, in which case the index cannot be built.
    if let Err(e) = sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS attendance_roll_date ON attendance (roll, date)",
    )
    .execute(pool)
    .await
    {
        error!(error = %e, "Could not enforce one check-in per roll per day");
        return Ok(());
    }

    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // A single long-lived connection, otherwise every connection gets its own :memory: database
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:").unwrap())
        .await
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn prepare_is_idempotent() {
        let pool = test_pool().await;
        let config = Config::for_tests();

        prepare(&pool, &config).await.unwrap();
        prepare(&pool, &config).await.unwrap();

        let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(admins, 1);
    }

    #[actix_web::test]
    async fn existing_duplicates_do_not_block_admin_seed() {
        let pool = test_pool().await;

        sqlx::query(
            "CREATE TABLE attendance (id INTEGER PRIMARY KEY AUTOINCREMENT, roll TEXT, name TEXT, date TEXT, time TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        for _ in 0..2 {
            sqlx::query("INSERT INTO attendance VALUES (NULL, 'R1', 'Alice', '2026-10-18', '09:00:00')")
                .execute(&pool)
                .await
                .unwrap();
        }

        prepare(&pool, &Config::for_tests()).await.unwrap();

        assert!(credentials::verify(&pool, "admin", "admin123").await.unwrap());
    }
}
