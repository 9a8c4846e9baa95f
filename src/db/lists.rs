//! Repository for the `movie_lists` join table.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::models::{ListEntry, Movie, MovieId, UserId};

pub struct ListRepo;

impl ListRepo {
    /// Put a movie on a user's list. Adding it twice is a no-op.
    ///
    /// The movie row must already exist.
    pub async fn add(
        conn: &mut SqliteConnection,
        user_id: UserId,
        movie_id: MovieId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO movie_lists (user_id, movie_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(movie_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Take a movie off a user's list. Returns `false` if it was not there.
    pub async fn remove(
        pool: &SqlitePool,
        user_id: UserId,
        movie_id: MovieId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_lists WHERE user_id = ? AND movie_id = ?")
            .bind(user_id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn contains(
        pool: &SqlitePool,
        user_id: UserId,
        movie_id: MovieId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM movie_lists WHERE user_id = ? AND movie_id = ?",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// A user's movies in the order they were added.
    pub async fn movies_for_user(
        pool: &SqlitePool,
        user_id: UserId,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            "SELECT movies.id, movies.overview, movies.poster_path, movies.release_date,
                    movies.runtime, movies.tagline, movies.title
             FROM movie_lists
             JOIN movies ON movies.id = movie_lists.movie_id
             WHERE movie_lists.user_id = ?
             ORDER BY movie_lists.rowid",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All list entries belonging to any of `user_ids`.
    pub async fn entries_for_users(
        pool: &SqlitePool,
        user_ids: &[UserId],
    ) -> Result<Vec<ListEntry>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT user_id, movie_id FROM movie_lists WHERE user_id IN (");
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        builder.build_query_as::<ListEntry>().fetch_all(pool).await
    }
}
