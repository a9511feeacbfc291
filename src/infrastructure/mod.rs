//! Infrastructure module: persistence and environment configuration.

pub mod config;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use config::{ConfigError, ServerConfig};
pub use in_memory::InMemoryTodoRepository;
pub use postgres::PostgresTodoRepository;
pub use repository::{RepositoryError, TodoRepository};
