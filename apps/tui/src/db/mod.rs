pub mod migrations;
pub mod session;
pub use migrations::{create_database_pool, create_memory_pool};
pub use session::{SessionCache, SessionError, SessionSnapshot};
