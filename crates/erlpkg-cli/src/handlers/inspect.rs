//! Inspect command handler.
//!
//! Shows the static recipe metadata and the declared option defaults, before
//! any platform rule runs.

use erlpkg_core::{Recipe, RecipeOption, declare_defaults};
use serde_json::json;

use super::print_json;
use crate::error::CliError;

pub fn execute(json: bool) -> Result<(), CliError> {
    let recipe = Recipe::ERL;
    let defaults = declare_defaults();

    if json {
        return print_json(&json!({
            "recipe": recipe,
            "reference": recipe.reference(),
            "default_options": defaults,
        }));
    }

    println!("{}", recipe.reference());
    println!("  description: {}", recipe.description);
    println!("  package type: {}", recipe.package_type);
    println!("  license: {}", recipe.license);
    println!("  author: {}", recipe.author);
    println!("  settings: {}", recipe.settings.join(", "));
    println!("  exports sources: {}", recipe.exports_sources.join(", "));
    println!();
    println!("Options:");
    for option in RecipeOption::ALL {
        println!(
            "  {:<10} default={:<5} {}",
            option.as_str(),
            defaults.value_or_default(option),
            option.description()
        );
    }
    Ok(())
}
