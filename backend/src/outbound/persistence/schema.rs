//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate them
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Created by the operator CLI.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 150 characters).
        username -> Varchar,
        /// Argon2id PHC string; never leaves the persistence layer.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named categories posts may belong to.
    groups (id) {
        id -> Int8,
        title -> Varchar,
        /// Unique URL identifier.
        slug -> Varchar,
        description -> Varchar,
    }
}

diesel::table! {
    /// Published posts.
    posts (id) {
        id -> Int8,
        text -> Text,
        /// Assigned by the database default at insert time.
        pub_date -> Timestamptz,
        author_id -> Uuid,
        /// Cleared when the group is deleted.
        group_id -> Nullable<Int8>,
        image -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Comments; deleted together with their post.
    comments (id) {
        id -> Int8,
        post_id -> Int8,
        author_id -> Uuid,
        text -> Text,
        created -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges, unique per `(user_id, author_id)`.
    follows (id) {
        id -> Int8,
        /// Follower.
        user_id -> Uuid,
        /// Followed author.
        author_id -> Uuid,
    }
}

diesel::joinable!(posts -> groups (group_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(users, groups, posts, comments, follows);
