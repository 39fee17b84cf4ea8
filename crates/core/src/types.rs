/// To-do identifiers; backed by a PostgreSQL BIGSERIAL in production.
pub type DbId = i64;

/// Completion instants, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
