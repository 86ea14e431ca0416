pub mod file_storage;
pub mod in_memory_storage;
pub mod session_storage;

pub use file_storage::JsonFileStorage;
pub use in_memory_storage::InMemoryStorage;
pub use session_storage::SessionStorage;
