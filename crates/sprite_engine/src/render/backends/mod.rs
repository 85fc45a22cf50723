//! Graphics backend implementations
//!
//! Contains in-repo implementations of the capability traits in
//! [`crate::render::api`]. Currently only the headless recorder used by
//! the test suite and the demo app; a real graphics backend lives outside
//! this crate.

pub mod headless;
