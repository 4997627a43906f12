use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Procedure names exposed by the server, one path segment each.
pub mod procedure {
    pub const HEALTHCHECK: &str = "healthcheck";
    pub const CREATE_TODO: &str = "createTodo";
    pub const GET_TODOS: &str = "getTodos";
    pub const UPDATE_TODO_STATUS: &str = "updateTodoStatus";
    pub const DELETE_TODO: &str = "deleteTodo";
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }

    /// The status a checkbox click moves to.
    pub fn toggled(self) -> Self {
        match self {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown todo status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for TodoStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TodoStatus::Pending),
            "completed" => Ok(TodoStatus::Completed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct CreateTodoInput {
    #[validate(custom(function = "not_blank", message = "Description cannot be empty"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct UpdateTodoStatusInput {
    pub id: i64,
    pub status: TodoStatus,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct DeleteTodoInput {
    pub id: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTodoOutput {
    pub success: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    MethodNotSupported,
    InternalServerError,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RpcError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RpcData<T> {
    pub data: T,
}

/// Body of every procedure response: `{"result":{"data":..}}` or
/// `{"error":{"code":..,"message":..}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RpcResponse<T> {
    Result(RpcData<T>),
    Error(RpcError),
}

impl<T> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        RpcResponse::Result(RpcData { data })
    }

    pub fn into_result(self) -> Result<T, RpcError> {
        match self {
            RpcResponse::Result(RpcData { data }) => Ok(data),
            RpcResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_value(TodoStatus::Pending).unwrap(), json!("pending"));
        assert_eq!(serde_json::to_value(TodoStatus::Completed).unwrap(), json!("completed"));
        assert!(serde_json::from_value::<TodoStatus>(json!("done")).is_err());
    }

    #[test]
    fn status_toggles_back_and_forth() {
        let status = TodoStatus::default();
        assert_eq!(status, TodoStatus::Pending);
        assert_eq!(status.toggled(), TodoStatus::Completed);
        assert_eq!(status.toggled().toggled(), TodoStatus::Pending);
    }

    #[test]
    fn status_parses_from_column_text() {
        assert_eq!("completed".parse::<TodoStatus>(), Ok(TodoStatus::Completed));
        assert_eq!(
            "archived".parse::<TodoStatus>(),
            Err(UnknownStatus("archived".to_owned()))
        );
    }

    #[test]
    fn create_input_rejects_blank_descriptions() {
        for description in ["", "   ", "\t\n"] {
            let input = CreateTodoInput { description: description.to_owned() };
            let errors = input.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("description"));
        }

        let input = CreateTodoInput { description: "Buy milk".to_owned() };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn response_envelope_shape() {
        let ok = RpcResponse::ok(DeleteTodoOutput { success: true });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "result": { "data": { "success": true } } })
        );

        let err: RpcResponse<DeleteTodoOutput> = RpcResponse::Error(RpcError {
            code: ErrorCode::NotFound,
            message: "Todo with id 7 not found".to_owned(),
        });
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "error": { "code": "NOT_FOUND", "message": "Todo with id 7 not found" } })
        );
    }

    #[test]
    fn todo_round_trips_rfc3339_timestamp() {
        let value = json!({
            "id": 1,
            "description": "Buy milk",
            "status": "pending",
            "created_at": "2026-10-16T08:30:00.123Z"
        });
        let todo: Todo = serde_json::from_value(value).unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.status, TodoStatus::Pending);
        assert_eq!(todo.created_at.timestamp_subsec_millis(), 123);
    }
}
