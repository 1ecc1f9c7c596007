//! Command-line construction for the three CMake invocations.
//!
//! Kept free of process handling so the exact arguments can be tested.

use std::path::Path;

use erlpkg_core::{BuildInvocation, Layout, Settings, cmake_bool};

/// Arguments for `cmake -S <source> -B <build> ...`.
pub fn configure_args(
    layout: &Layout,
    settings: &Settings,
    variables: &BuildInvocation,
    toolchain: Option<&Path>,
) -> Vec<String> {
    let mut args = vec![
        "-S".to_string(),
        layout.source_folder.display().to_string(),
        "-B".to_string(),
        layout.build_folder.display().to_string(),
        format!("-DCMAKE_BUILD_TYPE={}", settings.build_type),
    ];

    if let Some(toolchain) = toolchain {
        args.push(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()));
    }

    args.extend(
        variables
            .iter()
            .map(|(name, value)| format!("-D{name}={}", cmake_bool(value))),
    );

    args
}

/// Arguments for `cmake --build`.
pub fn build_args(layout: &Layout, settings: &Settings, jobs: usize) -> Vec<String> {
    vec![
        "--build".to_string(),
        layout.build_folder.display().to_string(),
        "--config".to_string(),
        settings.build_type.to_string(),
        "-j".to_string(),
        jobs.to_string(),
    ]
}

/// Arguments for `cmake --install`.
pub fn install_args(layout: &Layout, settings: &Settings) -> Vec<String> {
    vec![
        "--install".to_string(),
        layout.build_folder.display().to_string(),
        "--config".to_string(),
        settings.build_type.to_string(),
        "--prefix".to_string(),
        layout.package_folder.display().to_string(),
    ]
}
