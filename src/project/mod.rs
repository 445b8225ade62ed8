//! Project plumbing - locating the extension header and writing the wrapper
//!
//! The only part of quickwrap that touches the file system.

pub mod input;
pub mod manifest;
pub mod output;

pub use input::{resolve_input, ResolvedInput};
pub use output::{write_wrapper, OutputLayout};
