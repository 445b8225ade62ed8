//! Quick Backend - C++ wrappers exposed to Lua through tolua
//!
//! Emits a namespace of plain functions and raises Lua events from native
//! callbacks via the `LUA_EVENT_*` helper macros.

mod quick_codegen;

pub use quick_codegen::QuickCodeGen;
