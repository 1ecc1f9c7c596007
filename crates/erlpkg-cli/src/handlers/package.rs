//! Package command handler.
//!
//! Runs the install step into the package folder and publishes the package
//! descriptor. Used after an earlier `build`, or with a skipped build.

use erlpkg_core::PackagePublisher;
use tracing::info;

use super::print_descriptor;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let publisher = PackagePublisher::new(ctx.recipe, ctx.build_system()?, ctx.artifact_locator());
    publisher.package()?;

    let descriptor = publisher.publish(&ctx.settings)?;
    info!(reference = %ctx.recipe.reference(), "Published package");
    print_descriptor(&descriptor, json)
}
