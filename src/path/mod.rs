//! Path handling
//!
//! Lexical normalization and the bounded buffers resolution writes into.

pub mod buffer;
pub mod normalize;

pub use buffer::PathBuffer;
pub use normalize::{normalize, normalize_from};
