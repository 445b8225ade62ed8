//! Backend module - Code generation

pub mod codegen;

pub mod quick;

pub use codegen::CodeGen;
pub use quick::QuickCodeGen;
