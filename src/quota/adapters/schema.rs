//! Diesel schema shared by the SQL adapters.

diesel::table! {
    /// Registered users and their daily task ceiling.
    users (id) {
        /// User identifier.
        id -> Text,
        /// Stored credential.
        password -> Text,
        /// Maximum number of tasks per date bucket.
        max_todo -> Integer,
    }
}

diesel::table! {
    /// Tasks bucketed by owner and creation date.
    tasks (id) {
        /// Storage-generated task identifier (UUID text).
        id -> Text,
        /// Owning user identifier.
        user_id -> Text,
        /// Task text.
        content -> Text,
        /// Date bucket key.
        created_date -> Text,
    }
}

diesel::joinable!(tasks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, tasks);
