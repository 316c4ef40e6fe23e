pub mod backup;
pub mod board;
pub mod calendar;
pub mod import;
pub mod log;
