//! SQLite implementation of the storage traits.

pub mod connection;
pub mod lookup_repository;
pub mod preference_repository;
pub mod reminder_repository;
pub mod task_repository;

pub use connection::DbConnection;
pub use lookup_repository::LookupRepository;
pub use preference_repository::PreferenceRepository;
pub use reminder_repository::ReminderRepository;
pub use task_repository::TaskRepository;
