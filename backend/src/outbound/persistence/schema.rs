//! Diesel table definitions.
//!
//! Must match the DDL issued by [`ensure_users_table`](super::ensure_users_table).

diesel::table! {
    /// Directory users in insertion order of `id`.
    users (id) {
        /// `SERIAL` primary key; never reused.
        id -> Int4,
        /// Unique contact address.
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        avatar -> Varchar,
    }
}
