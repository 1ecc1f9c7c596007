//! Tool version queries on the host system.

mod commands;

pub use commands::{
    compiler_version_output, extract_version_number, get_cmake_version, get_command_version,
    major_version,
};
