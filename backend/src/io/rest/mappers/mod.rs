//! DTO ↔ domain mappers. The REST layer never hands domain models to
//! clients directly.

pub mod lookup_mapper;
pub mod reminder_mapper;
pub mod task_mapper;

pub use lookup_mapper::LookupMapper;
pub use reminder_mapper::ReminderMapper;
pub use task_mapper::TaskMapper;
