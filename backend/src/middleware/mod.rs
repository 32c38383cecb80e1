//! Actix middleware wrapped around every portal route.

pub mod trace;

pub use trace::Trace;
