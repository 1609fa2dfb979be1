/// Practice ids are PostgreSQL BIGSERIAL; the file store allocates from the same space.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
