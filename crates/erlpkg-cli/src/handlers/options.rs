//! Options command handler.
//!
//! Prints the option set after both platform rule passes, along with the
//! removals and any overrides that were ignored.

use serde_json::json;

use super::print_json;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    if json {
        return print_json(&json!({
            "settings": ctx.settings,
            "options": ctx.options.options(),
            "removals": ctx.options.removals(),
            "ignored_overrides": ctx.options.ignored_overrides(),
        }));
    }

    println!("settings: {}", ctx.settings);
    println!("options: {}", ctx.options.options());
    for removal in ctx.options.removals() {
        println!(
            "  removed {} ({} rule '{}')",
            removal.option.as_str(),
            removal.stage,
            removal.rule
        );
    }
    for option in ctx.options.ignored_overrides() {
        println!("  ignored override for removed option {}", option.as_str());
    }
    Ok(())
}
