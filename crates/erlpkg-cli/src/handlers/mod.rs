//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//!   (commands that need no evaluation context omit `ctx`)
//! - Thin wrappers that:
//!   1. Call erlpkg-core services with ports from the context
//!   2. Format output for the terminal, or as JSON with `--json`
//!
//! Handlers should NOT contain option or platform rules.

pub mod build;
pub mod inspect;
pub mod options;
pub mod package;
pub mod requirements;

use erlpkg_core::PackageDescriptor;
use serde::Serialize;

use crate::error::CliError;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_descriptor(descriptor: &PackageDescriptor, json: bool) -> Result<(), CliError> {
    if json {
        return print_json(descriptor);
    }

    println!("{}/{} ({})", descriptor.name, descriptor.version, descriptor.package_type);
    println!("  settings: {}", descriptor.settings);
    println!("  libs: {}", descriptor.libs.join(", "));
    for artifact in &descriptor.artifacts {
        println!("  artifact: {}", artifact.display());
    }
    Ok(())
}
