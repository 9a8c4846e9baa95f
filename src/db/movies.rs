//! Repository for the `movies` table (cached catalog metadata).

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::models::{Movie, MovieId};

/// Column list shared across queries.
const COLUMNS: &str = "id, overview, poster_path, release_date, runtime, tagline, title";

pub struct MovieRepo;

impl MovieRepo {
    /// Cache a movie's metadata. An existing row is left untouched.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn insert_or_ignore(
        conn: &mut SqliteConnection,
        movie: &Movie,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO movies
             (id, overview, poster_path, release_date, runtime, tagline, title)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(movie.id)
        .bind(&movie.overview)
        .bind(&movie.poster_path)
        .bind(&movie.release_date)
        .bind(movie.runtime)
        .bind(&movie.tagline)
        .bind(&movie.title)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find(pool: &SqlitePool, id: MovieId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = ?");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Movies whose id is in `ids`, ordered by title.
    pub async fn find_by_ids(pool: &SqlitePool, ids: &[MovieId]) -> Result<Vec<Movie>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM movies WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY title");

        builder.build_query_as::<Movie>().fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_pool;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            overview: Some(format!("About {title}")),
            poster_path: Some(format!("/{id}.jpg")),
            release_date: Some("2001-01-01".to_string()),
            runtime: Some(100),
            tagline: None,
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_or_ignore_keeps_first_metadata() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(MovieRepo::insert_or_ignore(&mut conn, &movie(1, "Alien")).await.unwrap());
        assert!(!MovieRepo::insert_or_ignore(&mut conn, &movie(1, "Aliens")).await.unwrap());
        drop(conn);

        let stored = MovieRepo::find(&pool, 1).await.unwrap().unwrap();
        assert_eq!(stored.title, "Alien");
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        for (id, title) in [(1, "Heat"), (2, "Alien"), (3, "Brazil")] {
            MovieRepo::insert_or_ignore(&mut conn, &movie(id, title)).await.unwrap();
        }
        drop(conn);

        let found = MovieRepo::find_by_ids(&pool, &[1, 2, 99]).await.unwrap();
        let titles: Vec<_> = found.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Heat"]);

        assert!(MovieRepo::find_by_ids(&pool, &[]).await.unwrap().is_empty());
    }
}
