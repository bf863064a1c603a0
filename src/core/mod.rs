//! Core value types and the backend contract. Nothing here depends on the runtime.

pub mod attribute;
pub mod backend;
pub mod geom;
pub mod key;
pub mod text;
