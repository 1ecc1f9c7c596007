//! Native build system port.
//!
//! The recipe drives an external build tool through three intent-based
//! operations. Implementations own every process and filesystem detail.

use super::BuildSystemError;
use crate::invocation::BuildInvocation;
use crate::settings::Settings;

/// External native build system.
///
/// `configure` receives the settings and the forwarded variable map; `build`
/// takes no further parameters; `install` copies the built artifacts into the
/// package folder. Each call blocks until the external tool finishes.
pub trait BuildSystemPort: Send + Sync {
    /// Configure the build tree.
    fn configure(
        &self,
        settings: &Settings,
        variables: &BuildInvocation,
    ) -> Result<(), BuildSystemError>;

    /// Compile the configured tree.
    fn build(&self) -> Result<(), BuildSystemError>;

    /// Install build outputs into the package folder.
    fn install(&self) -> Result<(), BuildSystemError>;
}
