//! CMake implementation of [`BuildSystemPort`].

pub mod args;
pub mod progress;

use std::path::PathBuf;
use std::process::Command;
use std::sync::{Mutex, PoisonError};

use erlpkg_core::{BuildInvocation, BuildSystemError, BuildSystemPort, Layout, Settings};
use tracing::{debug, info};

use progress::{StepOutput, run_streaming};

/// Marker file CMake writes into a configured build folder.
const CMAKE_CACHE: &str = "CMakeCache.txt";

/// Build folder and settings the next `build`/`install` operate on.
#[derive(Debug, Clone)]
struct Target {
    layout: Layout,
    settings: Settings,
}

/// Drives `cmake` for one source tree.
///
/// `build` and `install` take no parameters, so the adapter starts from the
/// layout and settings it was constructed with and switches to whatever
/// settings `configure` last received. The build folder and `--config`
/// always agree with the configured build type.
#[derive(Debug)]
pub struct CmakeBuildSystem {
    program: PathBuf,
    target: Mutex<Target>,
    jobs: usize,
}

impl CmakeBuildSystem {
    /// Locate `cmake` on the `PATH`.
    pub fn locate(layout: Layout, settings: Settings) -> Result<Self, BuildSystemError> {
        let program = which::which("cmake")
            .map_err(|e| BuildSystemError::ToolNotFound(format!("cmake ({e})")))?;
        debug!(program = %program.display(), "Found cmake");
        Ok(Self::with_program(program, layout, settings))
    }

    /// Use an explicit `cmake` executable.
    pub fn with_program(program: impl Into<PathBuf>, layout: Layout, settings: Settings) -> Self {
        Self {
            program: program.into(),
            target: Mutex::new(Target { layout, settings }),
            jobs: build_parallelism(),
        }
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    fn target(&self) -> Target {
        self.target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Point the adapter at the build folder for `settings`.
    fn retarget(&self, settings: &Settings) -> Target {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        if target.settings != *settings {
            let layout = Layout::cmake(&target.layout.source_folder, settings)
                .with_package_folder(&target.layout.package_folder);
            debug!(
                from = %target.layout.build_folder.display(),
                to = %layout.build_folder.display(),
                "Settings changed at configure, switching build folder"
            );
            *target = Target {
                layout,
                settings: settings.clone(),
            };
        }
        target.clone()
    }

    fn require_configured(layout: &Layout, step: &str) -> Result<(), BuildSystemError> {
        if layout.build_folder.join(CMAKE_CACHE).is_file() {
            Ok(())
        } else {
            Err(BuildSystemError::NotConfigured(format!(
                "cannot {step}: no {CMAKE_CACHE} in {}",
                layout.build_folder.display()
            )))
        }
    }

    fn run(
        &self,
        args: &[String],
        message: &'static str,
        track_progress: bool,
    ) -> Result<StepOutput, BuildSystemError> {
        debug!(program = %self.program.display(), args = ?args, "Running cmake");
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        run_streaming(cmd, message, track_progress).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BuildSystemError::ToolNotFound(self.program.display().to_string())
            } else {
                BuildSystemError::Io(e)
            }
        })
    }
}

impl BuildSystemPort for CmakeBuildSystem {
    fn configure(
        &self,
        settings: &Settings,
        variables: &BuildInvocation,
    ) -> Result<(), BuildSystemError> {
        let Target { layout, .. } = self.retarget(settings);
        std::fs::create_dir_all(&layout.build_folder)?;

        let toolchain = layout.toolchain_path();
        let toolchain = toolchain.is_file().then_some(toolchain.as_path());
        let args = args::configure_args(&layout, settings, variables, toolchain);

        let output = self.run(&args, "Configuring with CMake...", false)?;
        if !output.status.success() {
            return Err(BuildSystemError::ConfigureFailed {
                code: output.status.code(),
                message: output.failure_message(),
            });
        }

        info!(build_folder = %layout.build_folder.display(), "CMake configuration complete");
        Ok(())
    }

    fn build(&self) -> Result<(), BuildSystemError> {
        let Target { layout, settings } = self.target();
        Self::require_configured(&layout, "build")?;
        info!(jobs = self.jobs, "Building with {} parallel jobs", self.jobs);

        let args = args::build_args(&layout, &settings, self.jobs);
        let output = self.run(&args, "Compiling...", true)?;
        if !output.status.success() {
            return Err(BuildSystemError::BuildFailed {
                code: output.status.code(),
                message: output.failure_message(),
            });
        }

        info!("Compilation complete");
        Ok(())
    }

    fn install(&self) -> Result<(), BuildSystemError> {
        let Target { layout, settings } = self.target();
        Self::require_configured(&layout, "install")?;

        let args = args::install_args(&layout, &settings);
        let output = self.run(&args, "Installing...", false)?;
        if !output.status.success() {
            return Err(BuildSystemError::InstallFailed {
                code: output.status.code(),
                message: output.failure_message(),
            });
        }

        info!(package_folder = %layout.package_folder.display(), "Install complete");
        Ok(())
    }
}

/// Number of parallel build jobs.
///
/// Respects `CMAKE_BUILD_PARALLEL_LEVEL` when it holds a positive integer,
/// otherwise uses the logical CPU count.
pub fn build_parallelism() -> usize {
    parallelism_from(std::env::var("CMAKE_BUILD_PARALLEL_LEVEL").ok().as_deref())
}

fn parallelism_from(level: Option<&str>) -> usize {
    level
        .and_then(|val| val.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(num_cpus::get)
}
