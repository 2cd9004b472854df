pub mod control;
pub mod error;
pub mod extractors;
pub mod logs;
