//! The four todo operations.
//!
//! Each one runs a single store statement. Store failures are logged here and
//! passed on unchanged; nothing is retried.

use log::{debug, error};
use todo_shared::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, Todo, UpdateTodoStatusInput,
};

use crate::error::ApiError;
use crate::store::TodoStore;

pub async fn create_todo<S: TodoStore>(store: &S, input: CreateTodoInput) -> Result<Todo, ApiError> {
    let todo = store.insert(&input.description).await.map_err(|e| {
        error!("Todo creation failed: {e}");
        ApiError::Store(e)
    })?;
    debug!("created todo {}", todo.id);
    Ok(todo)
}

pub async fn get_todos<S: TodoStore>(store: &S) -> Result<Vec<Todo>, ApiError> {
    store.list().await.map_err(|e| {
        error!("Failed to fetch todos: {e}");
        ApiError::Store(e)
    })
}

/// A missing row is a [`ApiError::NotFound`], unlike [`delete_todo`].
pub async fn update_todo_status<S: TodoStore>(
    store: &S,
    input: UpdateTodoStatusInput,
) -> Result<Todo, ApiError> {
    let updated = store.update_status(input.id, input.status).await.map_err(|e| {
        error!("Todo status update failed: {e}");
        ApiError::Store(e)
    })?;
    updated.ok_or_else(|| {
        error!("Todo status update failed: todo {} not found", input.id);
        ApiError::NotFound(format!("Todo with id {} not found", input.id))
    })
}

pub async fn delete_todo<S: TodoStore>(
    store: &S,
    input: DeleteTodoInput,
) -> Result<DeleteTodoOutput, ApiError> {
    let success = store.delete(input.id).await.map_err(|e| {
        error!("Todo deletion failed: {e}");
        ApiError::Store(e)
    })?;
    debug!("delete todo {} -> {success}", input.id);
    Ok(DeleteTodoOutput { success })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use todo_shared::TodoStatus;

    #[actix_web::test]
    async fn missing_row_is_not_found_for_update_but_false_for_delete() {
        let store = SqliteStore::in_memory().await.unwrap();

        let err = update_todo_status(
            &store,
            UpdateTodoStatusInput { id: 5, status: TodoStatus::Completed },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Todo with id 5 not found"));

        let out = delete_todo(&store, DeleteTodoInput { id: 5 }).await.unwrap();
        assert_eq!(out, DeleteTodoOutput { success: false });
    }

    #[actix_web::test]
    async fn store_fault_propagates() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.close().await;

        let err = get_todos(&store).await.unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
    }

    #[actix_web::test]
    async fn create_then_list() {
        let store = SqliteStore::in_memory().await.unwrap();
        let created = create_todo(&store, CreateTodoInput { description: "Buy milk".into() })
            .await
            .unwrap();
        assert_eq!(get_todos(&store).await.unwrap(), vec![created]);
    }
}
