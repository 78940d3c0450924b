//! Schema-driven type coercion
//!
//! Given a schema (inferred or supplied) and a loosely-typed record, the
//! [`Coercer`] casts every value to its declared type, with the
//! [`OnInvalid`] policy deciding what happens to values that do not fit.

mod engine;
mod types;

pub use engine::Coercer;
pub use types::OnInvalid;
