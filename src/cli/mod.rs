//! Glue between command line arguments and the resolver

pub mod orchestration;

pub use orchestration::{run_resolve, ResolveArgs};
