//! Credential resolution.
//!
//! - `env`: Environment variable provider (the only supported source)

pub mod env;
