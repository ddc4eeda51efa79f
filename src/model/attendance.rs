use chrono::NaiveDateTime;
use sqlx::SqlitePool;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub roll: String,
    pub name: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug)]
pub enum MarkOutcome {
    Recorded(AttendanceRecord),
    AlreadyMarked,
}

/// Records a check-in for `roll` on the date of `now`.
///
/// The unique index on `(roll, date)` decides duplicates, so concurrent
/// submissions for the same student resolve to exactly one row.
pub async fn mark(
    pool: &SqlitePool,
    roll: &str,
    name: &str,
    now: NaiveDateTime,
) -> Result<MarkOutcome, sqlx::Error> {
    let date = now.format(DATE_FORMAT).to_string();
    let time = now.format(TIME_FORMAT).to_string();

    let result = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        INSERT INTO attendance (roll, name, date, time)
        VALUES (?, ?, ?, ?)
        RETURNING id, roll, name, date, time
        "#,
    )
    .bind(roll)
    .bind(name)
    .bind(&date)
    .bind(&time)
    .fetch_one(pool)
    .await;

    match result {
        Ok(record) => Ok(MarkOutcome::Recorded(record)),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(MarkOutcome::AlreadyMarked);
                }
            }
            Err(e)
        }
    }
}

/// All records in insertion order.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, roll, name, date, time FROM attendance ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, db};
    use chrono::NaiveDate;

    async fn pool() -> SqlitePool {
        let pool = db::test_pool().await;
        db::prepare(&pool, &Config::for_tests()).await.unwrap();
        pool
    }

    fn day(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[actix_web::test]
    async fn first_mark_of_the_day_is_recorded() {
        let pool = pool().await;

        let outcome = mark(&pool, "R1", "Alice", day(18, 9, 5, 7)).await.unwrap();
        let record = match outcome {
            MarkOutcome::Recorded(record) => record,
            MarkOutcome::AlreadyMarked => panic!("first mark must be recorded"),
        };

        assert_eq!(record.roll, "R1");
        assert_eq!(record.name, "Alice");
        assert_eq!(record.date, "2026-10-18");
        assert_eq!(record.time, "09:05:07");
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn second_mark_same_day_is_rejected() {
        let pool = pool().await;

        mark(&pool, "R1", "Alice", day(18, 9, 0, 0)).await.unwrap();
        let again = mark(&pool, "R1", "Alice B.", day(18, 15, 30, 0)).await.unwrap();

        assert!(matches!(again, MarkOutcome::AlreadyMarked));
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn same_roll_next_day_and_other_rolls_are_recorded() {
        let pool = pool().await;

        mark(&pool, "R1", "Alice", day(18, 9, 0, 0)).await.unwrap();
        let next_day = mark(&pool, "R1", "Alice", day(19, 9, 0, 0)).await.unwrap();
        let other = mark(&pool, "R2", "Bob", day(18, 9, 1, 0)).await.unwrap();

        assert!(matches!(next_day, MarkOutcome::Recorded(_)));
        assert!(matches!(other, MarkOutcome::Recorded(_)));
        assert_eq!(count(&pool).await.unwrap(), 3);
    }

    #[actix_web::test]
    async fn list_all_keeps_insertion_order() {
        let pool = pool().await;

        mark(&pool, "R9", "Zed", day(18, 8, 0, 0)).await.unwrap();
        mark(&pool, "R1", "Alice", day(18, 9, 0, 0)).await.unwrap();

        let rolls: Vec<String> = list_all(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.roll)
            .collect();
        assert_eq!(rolls, vec!["R9", "R1"]);
    }
}
