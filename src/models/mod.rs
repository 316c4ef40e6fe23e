pub mod calendar_event;
pub mod category;
pub mod leave;
pub mod priority;
pub mod project;
pub mod status;
pub mod task;
