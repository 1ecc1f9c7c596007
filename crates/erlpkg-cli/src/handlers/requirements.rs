//! Requirements command handler.

use erlpkg_core::declare_dependencies;

use super::print_json;
use crate::error::CliError;

/// List the dependency declarations in order.
pub fn execute(json: bool) -> Result<(), CliError> {
    let dependencies = declare_dependencies();
    if json {
        return print_json(&dependencies);
    }

    for dependency in &dependencies {
        println!("{dependency}");
    }
    Ok(())
}
