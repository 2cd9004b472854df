mod control;
mod error;
