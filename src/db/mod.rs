pub mod db_utils;
pub mod initialize;
pub mod leaves;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod source;
pub mod stats;
pub mod tasks;
