/// Primary keys are UUIDv7: time-sortable, generated at insert time.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh identifier for a new row.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
