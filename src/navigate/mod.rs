//! Navigate module
//!
//! Handles directory navigation for a session,
//! including changing directories and retrieving the current path.

mod operations;

// Re-export public types and functions
pub use operations::{change_directory, change_to_parent, current_directory};
