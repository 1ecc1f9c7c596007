//! Command dispatch and exit code mapping through `erlpkg_cli::run`.

use clap::Parser;
use erlpkg_cli::{Cli, CliError, run};
use tempfile::tempdir;

fn run_args(args: &[&str]) -> Result<(), CliError> {
    let mut argv = vec!["erlpkg"];
    argv.extend_from_slice(args);
    run(Cli::parse_from(argv))
}

#[test]
fn test_inspect_and_requirements_need_no_context() {
    run_args(&["inspect"]).unwrap();
    run_args(&["inspect", "--json"]).unwrap();
    run_args(&["requirements", "--json"]).unwrap();
}

#[test]
fn test_options_for_another_platform() {
    run_args(&["options", "-s", "os=Windows", "-s", "compiler=msvc", "-o", "shared=True"]).unwrap();
}

#[test]
fn test_unknown_option_exits_with_usage_code() {
    let err = run_args(&["options", "-o", "lto=True"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_invalid_setting_exits_with_usage_code() {
    let err = run_args(&["options", "-s", "os=Plan9"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_profile_exits_with_io_code() {
    let dir = tempdir().unwrap();
    let profile = dir.path().join("missing.json");
    let err = run_args(&["options", "--profile", profile.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_broken_profile_exits_with_data_code() {
    let dir = tempdir().unwrap();
    let profile = dir.path().join("profile.json");
    std::fs::write(&profile, "{ settings: ").unwrap();
    let err = run_args(&["options", "--profile", profile.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.exit_code(), 65);
}

#[test]
fn test_bad_skip_test_value_exits_with_config_code() {
    let dir = tempdir().unwrap();
    let err = run_args(&[
        "build",
        "--source-folder",
        dir.path().to_str().unwrap(),
        "-c",
        "tools.build:skip_test=sometimes",
    ])
    .unwrap_err();
    assert_eq!(err.exit_code(), 78);
}

#[test]
fn test_malformed_conf_entry_exits_with_config_code() {
    let err = run_args(&["options", "-c", "skip_test=true"]).unwrap_err();
    assert_eq!(err.exit_code(), 78);
}

#[cfg(unix)]
mod skipped_build {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A `cmake` stand-in that accepts every invocation.
    fn fake_cmake(dir: &Path) -> PathBuf {
        let path = dir.join("fake-cmake");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn skipped_build(source: &Path, cmake: &Path) -> Result<(), CliError> {
        run_args(&[
            "build",
            "--source-folder",
            source.to_str().unwrap(),
            "--cmake",
            cmake.to_str().unwrap(),
            "-s",
            "os=Linux",
            "-s",
            "compiler=gcc",
            "-s",
            "build_type=Release",
            "-c",
            "tools.build:skip_test=true",
        ])
    }

    fn mark_configured(source: &Path) {
        let build_folder = source.join("build").join("Release");
        fs::create_dir_all(&build_folder).unwrap();
        fs::write(build_folder.join("CMakeCache.txt"), "").unwrap();
    }

    #[test]
    fn test_skipped_build_without_configured_folder_exits_with_software_code() {
        let dir = tempdir().unwrap();
        let cmake = fake_cmake(dir.path());

        let err = skipped_build(dir.path(), &cmake).unwrap_err();

        assert_eq!(err.exit_code(), 70);
        assert!(err.to_string().contains("CMakeCache.txt"));
    }

    #[test]
    fn test_skipped_build_publishes_existing_library() {
        let dir = tempdir().unwrap();
        let cmake = fake_cmake(dir.path());
        mark_configured(dir.path());
        let lib_folder = dir.path().join("package").join("lib");
        fs::create_dir_all(&lib_folder).unwrap();
        fs::write(lib_folder.join("liberl.a"), b"!<arch>\n").unwrap();

        skipped_build(dir.path(), &cmake).unwrap();

        // Skipping never writes a build record
        assert!(
            !dir.path()
                .join("build")
                .join("Release")
                .join("erlpkg-build.json")
                .exists()
        );
    }

    #[test]
    fn test_skipped_build_without_library_exits_with_software_code() {
        let dir = tempdir().unwrap();
        let cmake = fake_cmake(dir.path());
        mark_configured(dir.path());

        let err = skipped_build(dir.path(), &cmake).unwrap_err();

        assert_eq!(err.exit_code(), 70);
        assert!(err.to_string().contains("liberl.a"));
    }
}
