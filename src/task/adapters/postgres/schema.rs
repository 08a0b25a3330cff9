//! Diesel schema for task ordering persistence.

diesel::table! {
    /// Task records keyed by partition and ordering key.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project (partition container).
        project_id -> Uuid,
        /// Display title.
        #[max_length = 255]
        title -> Varchar,
        /// Column status.
        #[max_length = 50]
        status -> Varchar,
        /// Ordering key within `(project_id, status)`.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
