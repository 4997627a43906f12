//! Persistence for todo rows.
//!
//! [`TodoStore`] is the seam handlers talk to. Each method maps to exactly
//! one SQL statement; [`sqlite::SqliteStore`] is the implementation wired
//! into [`crate::state::AppState`].

pub mod sqlite;

use std::future::Future;

use todo_shared::{Todo, TodoStatus};

pub use sqlite::SqliteStore;

pub trait TodoStore: Send + Sync + 'static {
    /// Insert a `pending` row and return it with its assigned id and timestamp.
    fn insert(&self, description: &str) -> impl Future<Output = Result<Todo, sqlx::Error>> + Send;

    /// Every row, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>, sqlx::Error>> + Send;

    /// `None` when no row has `id`.
    fn update_status(
        &self,
        id: i64,
        status: TodoStatus,
    ) -> impl Future<Output = Result<Option<Todo>, sqlx::Error>> + Send;

    /// `true` iff a row was removed.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}
