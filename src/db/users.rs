//! Repository for the `users` table.

use sqlx::SqlitePool;

use crate::models::{user::UserSummary, User, UserId};

/// Provides lookups and inserts for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Fails with a unique violation if the name is taken.
    pub async fn create(pool: &SqlitePool, username: &str, hash: &str) -> Result<User, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (username, hash) VALUES (?, ?)")
            .bind(username)
            .bind(hash)
            .execute(pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            hash: hash.to_string(),
        })
    }

    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, username, hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Every user except `user_id`, ordered by name.
    pub async fn list_others(
        pool: &SqlitePool,
        user_id: UserId,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, username FROM users WHERE id <> ? ORDER BY username",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

/// True when `err` is a uniqueness constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let user = UserRepo::create(&pool, "alice", "hash").await.unwrap();

        let found = UserRepo::find_by_username(&pool, "alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert!(UserRepo::username_exists(&pool, "alice").await.unwrap());
        assert!(!UserRepo::username_exists(&pool, "bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected_by_the_store() {
        let pool = test_pool().await;
        UserRepo::create(&pool, "alice", "hash").await.unwrap();

        let err = UserRepo::create(&pool, "alice", "other").await.unwrap_err();
        assert!(is_unique_violation(&err));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'alice'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_list_others_excludes_self() {
        let pool = test_pool().await;
        let alice = UserRepo::create(&pool, "alice", "h").await.unwrap();
        UserRepo::create(&pool, "carol", "h").await.unwrap();
        UserRepo::create(&pool, "bob", "h").await.unwrap();

        let others = UserRepo::list_others(&pool, alice.id).await.unwrap();
        let names: Vec<_> = others.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);
    }
}
