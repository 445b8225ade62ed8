//! Frontend module - API naming, header scanning, callback names

pub mod identity;
pub mod strip;
pub mod scanner;
pub mod callbacks;

pub use identity::ApiIdentity;
pub use scanner::scan_header;
pub use callbacks::{resolve_callbacks, CallbackEntry};
