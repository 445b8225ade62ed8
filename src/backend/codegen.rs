//! Code Generation trait - Backend abstraction
//!
//! A backend turns the wired [`WrapperUnit`] into the wrapper header and
//! source text. Generation is pure and cannot fail.
#![allow(dead_code)]

use crate::middle::record::WrapperUnit;

/// Header and source text of one generated wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSources {
    pub header: String,
    pub source: String,
}

/// Code generation backend trait
pub trait CodeGen {
    /// Render the wrapper header and source for `unit`
    fn generate(&mut self, unit: &WrapperUnit) -> GeneratedSources;

    /// Get the backend name
    fn name(&self) -> &str;
}
