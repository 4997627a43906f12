//! Local view state and the user actions that change it.
//!
//! State only changes after a successful response; failed calls are logged
//! and otherwise ignored, so the previous state stays on screen.

use log::{error, info};
use todo_shared::{CreateTodoInput, DeleteTodoInput, Todo, TodoStatus, UpdateTodoStatusInput};

use crate::api::TodoApi;

#[derive(Debug, Default)]
pub struct TodoView {
    pub todos: Vec<Todo>,
    /// Description being typed.
    pub input: String,
    pub selected: usize,
}

impl TodoView {
    pub async fn load(&mut self, api: &impl TodoApi) {
        match api.get_todos().await {
            Ok(todos) => {
                info!("loaded {} todos", todos.len());
                self.todos = todos;
                self.clamp_selection();
            }
            Err(e) => error!("Failed to load todos: {e}"),
        }
    }

    pub async fn submit(&mut self, api: &impl TodoApi) {
        let description = self.input.trim();
        if description.is_empty() {
            return;
        }
        let input = CreateTodoInput {
            description: description.to_owned(),
        };
        match api.create_todo(input).await {
            Ok(todo) => {
                self.todos.insert(0, todo);
                self.input.clear();
                self.selected = 0;
            }
            Err(e) => error!("Failed to create todo: {e}"),
        }
    }

    pub async fn toggle_selected(&mut self, api: &impl TodoApi) {
        let Some(todo) = self.todos.get(self.selected) else {
            return;
        };
        let input = UpdateTodoStatusInput {
            id: todo.id,
            status: todo.status.toggled(),
        };
        match api.update_todo_status(input).await {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == updated.id) {
                    *slot = updated;
                }
            }
            Err(e) => error!("Failed to update todo status: {e}"),
        }
    }

    pub async fn delete_selected(&mut self, api: &impl TodoApi) {
        let Some(id) = self.todos.get(self.selected).map(|t| t.id) else {
            return;
        };
        match api.delete_todo(DeleteTodoInput { id }).await {
            Ok(_) => {
                self.todos.retain(|t| t.id != id);
                self.clamp_selection();
            }
            Err(e) => error!("Failed to delete todo: {e}"),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn pending_count(&self) -> usize {
        self.count(TodoStatus::Pending)
    }

    pub fn completed_count(&self) -> usize {
        self.count(TodoStatus::Completed)
    }

    fn count(&self, status: TodoStatus) -> usize {
        self.todos.iter().filter(|t| t.status == status).count()
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.todos.len().saturating_sub(1));
    }
}
