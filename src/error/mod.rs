//! Error handling
//!
//! Defines error types and handling for the virtual filesystem.

pub mod handlers;
pub mod types;

pub use handlers::{error_to_ftp_code, handle_error};
pub use types::*;
