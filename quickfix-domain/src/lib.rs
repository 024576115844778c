//! Domain logic: map a diagnostic on an analyzed tree to candidate fixes.
//!
//! This crate owns *which* fixes apply and in what order. It does not own how
//! a fix is turned into text; that's the `quickfix-edit` crate.

mod factories;
mod registry;
mod resolver;

pub use factories::*;
pub use registry::{FixRegistry, RegisteredFactory, RegistryBuilder, RegistryError};
pub use resolver::{BatchMode, ResolvedDiagnostic, Resolver};
