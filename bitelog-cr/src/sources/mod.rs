//! Read-only accessors over the two review sources and the profile table
//!
//! Each function is a plain query against the shared pool; the engine
//! composes them but never writes. Conversion from row models to
//! `ReconciledMatch` happens here so the engine layers deal in one type.

pub mod profiles;
pub mod ratings;
pub mod reviews;
