/// Record identifiers are opaque strings, unique within a collection.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (breeding, due, collection, expiry) carry no time zone.
pub type Date = chrono::NaiveDate;
