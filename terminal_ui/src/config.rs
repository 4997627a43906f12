use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    /// Logs go to a file so they never draw over the terminal UI.
    pub log_file: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("TODO_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:2022/".to_owned()),
            log_file: std::env::var("TODO_TUI_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("todo-tui.log")),
        }
    }
}
