use std::collections::{BTreeSet, HashMap};

use sqlx::SqlitePool;

use crate::{
    db::{ListRepo, MovieRepo},
    error::AppResult,
    models::{ListEntry, Movie, MovieId, UserId},
};

/// Movie ids present on every given user's list
///
/// `user_ids` is the full participant set (the current user included). A user
/// without entries contributes an empty set, so the result is empty too.
pub fn common_movie_ids(user_ids: &[UserId], entries: &[ListEntry]) -> BTreeSet<MovieId> {
    let mut per_user: HashMap<UserId, BTreeSet<MovieId>> = user_ids
        .iter()
        .map(|id| (*id, BTreeSet::new()))
        .collect();

    for entry in entries {
        if let Some(movies) = per_user.get_mut(&entry.user_id) {
            movies.insert(entry.movie_id);
        }
    }

    let mut sets = per_user.into_values();
    let Some(first) = sets.next() else {
        return BTreeSet::new();
    };

    sets.fold(first, |acc, set| acc.intersection(&set).copied().collect())
}

/// Movies shared by the current user and every selected user
pub async fn shared_movies(
    pool: &SqlitePool,
    current_user: UserId,
    selected: &[UserId],
) -> AppResult<Vec<Movie>> {
    let mut participants: Vec<UserId> = selected.to_vec();
    participants.push(current_user);
    participants.sort_unstable();
    participants.dedup();

    let entries = ListRepo::entries_for_users(pool, &participants).await?;
    let common: Vec<MovieId> = common_movie_ids(&participants, &entries)
        .into_iter()
        .collect();

    tracing::debug!(
        participants = participants.len(),
        entries = entries.len(),
        common = common.len(),
        "Computed shared movies"
    );

    Ok(MovieRepo::find_by_ids(pool, &common).await?)
}
