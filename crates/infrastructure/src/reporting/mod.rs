//! Reporter implementations.

mod console;
mod json_file;

pub use console::ConsoleReporter;
pub use json_file::JsonFileReporter;
