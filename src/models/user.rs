use serde::Serialize;
use sqlx::FromRow;

use super::UserId;

/// A row of the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub hash: String,
}

/// What templates get to see about another user
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
}
