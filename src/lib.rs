pub mod catalog;
pub mod config;
pub mod export;
pub mod grading;
pub mod output;
pub mod tui;
