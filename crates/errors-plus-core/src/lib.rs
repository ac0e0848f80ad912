//! Core traits and types for errors-plus.
//!
//! This crate provides the error DTO protocol, its convenience implementations, the
//! descriptor types accepted by the aggregator, the standard errors and the flags
//! that turn them on.

pub mod descriptor;
pub mod flags;
pub mod protocol;
pub mod standard;

pub use descriptor::{Descriptor, IntoDescriptor, RawDescriptor};
#[cfg(feature = "config")]
pub use flags::ConfigError;
pub use flags::{ErrorFlags, Flag};
pub use protocol::{BaseErrorDto, ErrorDto, StandardErrorDto};
pub use standard::StandardError;

pub use errors_plus_openapi::{Example, Examples};
