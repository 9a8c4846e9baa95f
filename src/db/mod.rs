pub mod lists;
pub mod movies;
pub mod redis;
pub mod sessions;
pub mod sqlite;
pub mod users;

pub use lists::ListRepo;
pub use movies::MovieRepo;
pub use self::redis::{create_redis_client, RedisSessionStore};
pub use sessions::{SessionStore, SqlSessionStore};
pub use sqlite::create_pool;
pub use users::UserRepo;
