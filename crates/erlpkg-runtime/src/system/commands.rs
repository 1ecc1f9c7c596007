//! Command version extraction.

use std::process::Command;

/// First line printed by `cmd <version_flag>`, or `None` if the command is
/// missing or fails.
pub fn get_command_version(cmd: &str, version_flag: &str) -> Option<String> {
    let output = Command::new(cmd).arg(version_flag).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Some tools print their banner on stderr
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines().next().map(|s| s.trim().to_string())
}

/// Installed cmake version.
pub fn get_cmake_version() -> Option<String> {
    let output = get_command_version("cmake", "--version")?;
    // "cmake version 3.28.1" -> "3.28.1"
    output.split_whitespace().nth(2).map(ToString::to_string)
}

/// First line of `<compiler> --version`.
pub fn compiler_version_output(compiler: &str) -> Option<String> {
    get_command_version(compiler, "--version")
}

/// Pull a dotted version number out of a compiler banner.
///
/// Handles "gcc (Ubuntu 13.2.0-4ubuntu3) 13.2.0",
/// "Apple clang version 15.0.0 (clang-1500.1.0.2.5)" and
/// "Ubuntu clang version 17.0.6 (++20231208085846+6009708b4367-1~exp1~20231208085949.74)".
pub fn extract_version_number(line: &str) -> Option<String> {
    if let Some(rest) = line.split("clang version").nth(1) {
        return rest.split_whitespace().next().map(ToString::to_string);
    }

    line.split_whitespace()
        .rev()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()) && word.contains('.'))
        .map(ToString::to_string)
}

/// Leading component of a dotted version ("13.2.0" -> "13").
pub fn major_version(version: &str) -> Option<&str> {
    version
        .split('.')
        .next()
        .filter(|major| !major.is_empty() && major.chars().all(|c| c.is_ascii_digit()))
}
