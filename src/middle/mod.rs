//! Middle-end module - translation and lifecycle wiring

pub mod record;
pub mod translate;
pub mod lifecycle;

pub use record::WrapperUnit;
pub use translate::SignatureTranslator;
pub use lifecycle::wire_lifecycle;
