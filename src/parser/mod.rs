//! Parsers for the text emitted by the Android build tools.
//!
//! Both are pure functions over captured tool output; running the tools
//! lives in [`crate::tools`].

pub mod badging;
pub mod signature;

pub use badging::extract_metadata;
pub use signature::extract_signature;
