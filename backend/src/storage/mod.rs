//! Storage layer: trait abstractions plus the SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{LookupStore, PreferenceStore, ReminderStore, TaskStore};
