//! Calendar event materialization: expand, filter, group.

pub mod expander;
pub mod filter;
pub mod group;
pub mod materialize;

pub use filter::CalendarFilter;
pub use materialize::{CalendarLogic, CalendarSource, CalendarView};
