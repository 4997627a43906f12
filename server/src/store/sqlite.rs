//! SQLite implementation of [`TodoStore`].
//!
//! Migrations under `server/migrations` are embedded at compile time and run
//! on [`SqliteStore::connect`]. The store assigns `id` and `created_at`;
//! `created_at` is written as RFC 3339 text with millisecond precision so
//! that ordering by the column text is chronological.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use todo_shared::{Todo, TodoStatus};

use super::TodoStore;

const TODO_COLUMNS: &str = "id, description, status, created_at";

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = sqlx::Error;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let status =
            TodoStatus::from_str(&row.status).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Todo {
            id: row.id,
            description: row.description,
            status,
            created_at: row.created_at,
        })
    }
}

impl SqliteStore {
    /// Open (or create) the database at `url` and run pending migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    /// A private in-memory database. Pinned to one connection that is never
    /// recycled, since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl TodoStore for SqliteStore {
    async fn insert(&self, description: &str) -> Result<Todo, sqlx::Error> {
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO todos (description) VALUES (?1) RETURNING {TODO_COLUMNS}"
        ))
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update_status(&self, id: i64, status: TodoStatus) -> Result<Option<Todo>, sqlx::Error> {
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "UPDATE todos SET status = ?1 WHERE id = ?2 RETURNING {TODO_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Todo::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SubsecRound;

    async fn store() -> SqliteStore {
        SqliteStore::in_memory().await.expect("in-memory store")
    }

    #[actix_web::test]
    async fn insert_assigns_pending_status_id_and_timestamp() {
        let store = store().await;
        // The column keeps milliseconds only.
        let before = Utc::now().trunc_subsecs(3);
        let todo = store.insert("Buy milk").await.unwrap();
        let after = Utc::now();

        assert_eq!(todo.description, "Buy milk");
        assert_eq!(todo.status, TodoStatus::Pending);
        assert!(todo.id > 0);
        assert!(todo.created_at >= before, "{} < {}", todo.created_at, before);
        assert!(todo.created_at <= after, "{} > {}", todo.created_at, after);
    }

    #[actix_web::test]
    async fn ids_are_distinct() {
        let store = store().await;
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(store.insert(&format!("todo {i}")).await.unwrap().id);
        }
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[actix_web::test]
    async fn ids_are_not_reused_after_delete() {
        let store = store().await;
        let first = store.insert("first").await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        let second = store.insert("second").await.unwrap();
        assert!(second.id > first.id);
    }

    #[actix_web::test]
    async fn list_is_empty_without_rows() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn list_returns_newest_first() {
        let store = store().await;
        for i in 0..5 {
            store.insert(&format!("todo {i}")).await.unwrap();
        }

        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 5);
        assert!(todos.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(todos[0].description, "todo 4");
        assert_eq!(todos[4].description, "todo 0");
    }

    #[actix_web::test]
    async fn update_status_toggles_and_keeps_other_fields() {
        let store = store().await;
        let created = store.insert("Walk the dog").await.unwrap();

        for status in [
            TodoStatus::Completed,
            TodoStatus::Pending,
            TodoStatus::Completed,
            TodoStatus::Completed,
        ] {
            let updated = store.update_status(created.id, status).await.unwrap().unwrap();
            assert_eq!(updated.status, status);
            assert_eq!(updated.id, created.id);
            assert_eq!(updated.description, created.description);
            assert_eq!(updated.created_at, created.created_at);
        }
    }

    #[actix_web::test]
    async fn update_status_on_missing_id_creates_nothing() {
        let store = store().await;
        let updated = store.update_status(42, TodoStatus::Completed).await.unwrap();
        assert!(updated.is_none());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = store().await;
        let keep = store.insert("keep").await.unwrap();
        let drop = store.insert("drop").await.unwrap();

        assert!(store.delete(drop.id).await.unwrap());
        assert!(!store.delete(drop.id).await.unwrap());
        assert!(!store.delete(9_999).await.unwrap());

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining, vec![keep]);
    }

    #[actix_web::test]
    async fn status_column_rejects_unknown_values() {
        let store = store().await;
        let result = sqlx::query("INSERT INTO todos (description, status) VALUES ('x', 'archived')")
            .execute(&store.pool)
            .await;
        assert!(result.is_err());
    }
}
