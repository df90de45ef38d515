pub mod cli;
pub mod errors;
pub mod exporter;
pub mod file_scanner;
pub mod language;
pub mod logger;
pub mod selection;
pub mod tree_builder;
pub mod tui;
pub mod workflow;
