//! Shared docdiff data models consumed by the core library and extractor crates.

pub mod diff;
pub mod report;
pub mod source;

pub use diff::*;
pub use report::*;
pub use source::*;
