//! Build command handler.
//!
//! Generates the toolchain, runs configure and build (unless
//! `tools.build:skip_test` is set), records the build, then packages and
//! publishes.

use erlpkg_core::{BuildOrchestrator, BuildOutcome, PackagePublisher, Toolchain};
use erlpkg_runtime::system::get_cmake_version;
use erlpkg_runtime::{BuildRecord, write_toolchain};
use tracing::info;

use super::print_descriptor;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let skip_test = ctx.skip_test()?;

    let toolchain = Toolchain::generate(&ctx.recipe, &ctx.settings, &ctx.options);
    write_toolchain(&ctx.layout, &toolchain)?;

    let build_system = ctx.build_system()?;
    let orchestrator = BuildOrchestrator::new(ctx.recipe, build_system.clone());

    match orchestrator.build(&ctx.settings, &ctx.options, skip_test)? {
        BuildOutcome::Built(report) => {
            let path = ctx.layout.build_record_path();
            BuildRecord::new(report, get_cmake_version()).save(&path)?;
            info!(record = %path.display(), "Saved build record");
        }
        BuildOutcome::Skipped => {
            info!("Build skipped, packaging whatever the build folder holds");
        }
    }

    let publisher = PackagePublisher::new(ctx.recipe, build_system, ctx.artifact_locator());
    publisher.package()?;
    let descriptor = publisher.publish(&ctx.settings)?;
    print_descriptor(&descriptor, json)
}
