//! Puzzle catalog for PolarCraft.
//!
//! Ships the built-in tutorial levels, reads and writes level files as RON,
//! and checks a world against a level's goal.

mod builtin;
mod error;
mod file;
mod goal;

pub use builtin::{builtin_levels, find_builtin};
pub use error::LevelError;
pub use file::{LEVEL_FILE_EXTENSION, load_level_file, resolve_level, save_level_file};
pub use goal::{apply_solution, goal_status, is_solved};
