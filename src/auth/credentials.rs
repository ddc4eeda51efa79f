//! The admin credential row. Passwords are stored and compared as plaintext.

use sqlx::SqlitePool;

/// True when `username`/`password` match a stored admin row exactly.
pub async fn verify(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, sqlx::Error> {
    let matches: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM admin WHERE username = ? AND password = ?")
            .bind(username)
            .bind(password)
            .fetch_one(pool)
            .await?;

    Ok(matches > 0)
}

/// Inserts the admin row unless one already exists for `username`.
/// An existing password is never overwritten.
pub async fn seed(pool: &SqlitePool, username: &str, password: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO admin (username, password)
        SELECT ?, ?
        WHERE NOT EXISTS (SELECT 1 FROM admin WHERE username = ?)
        "#,
    )
    .bind(username)
    .bind(password)
    .bind(username)
    .execute(pool)
    .await?;

    Ok(())
}
