//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Issues, scoped to a project by name.
    issues (id) {
        /// Primary key, generated by `gen_random_uuid()` on insert.
        id -> Uuid,
        project -> Text,
        issue_title -> Text,
        issue_text -> Text,
        created_by -> Text,
        assigned_to -> Text,
        status_text -> Text,
        open -> Bool,
        created_on -> Timestamptz,
        updated_on -> Timestamptz,
        /// Insertion order; ties on `created_on` are broken by this column.
        seq -> Int8,
    }
}
