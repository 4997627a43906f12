pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
