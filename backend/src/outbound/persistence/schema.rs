//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users, unique by username.
    users (id) {
        id -> Uuid,
        username -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only exercise entries.
    exercises (id) {
        id -> Uuid,
        /// Insertion order; assigned by an identity column.
        seq -> Int8,
        user_id -> Uuid,
        /// Owner's username copied at insertion time.
        username -> Text,
        description -> Text,
        duration_minutes -> Int4,
        performed_on -> Date,
        created_at -> Timestamptz,
    }
}
