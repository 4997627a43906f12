use crate::store::SqliteStore;

/// Shared by every request through `web::Data`.
pub struct AppState {
    pub store: SqliteStore,
}
