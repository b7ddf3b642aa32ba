/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A loosely-typed JSON object: rule parameters, configuration snapshots,
/// and input records all share this shape.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
