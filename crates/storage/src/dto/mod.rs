pub mod common;
pub mod exercise;
pub mod progress;
pub mod workout;
