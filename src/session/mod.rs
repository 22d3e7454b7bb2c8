//! Session context
//!
//! Per-connection root and working directory tracking, and the resolver that
//! confines client paths to them.

pub mod resolve;
pub mod state;

pub use resolve::{resolve_pair, resolve_within_session};
pub use state::{BufferSlot, Prefix, Session};
