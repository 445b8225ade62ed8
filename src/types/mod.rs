//! Type translation rules

pub mod type_rules;

pub use type_rules::{Note, NoteKind, ReturnTransform, TypeRules};
